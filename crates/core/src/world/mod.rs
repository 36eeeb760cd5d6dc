mod color;
pub mod entity;
mod generate;
pub mod grid;
pub mod movement;
pub mod region;
pub mod tile;

use crate::{
    timed,
    world::{
        entity::{Entity, EntityId},
        generate::WorldBuilder,
        grid::{GridPoint, TileGrid},
        movement::Movement,
        region::{Continent, ContinentId, Region, RegionId},
        tile::{Tile, TileType},
    },
    WorldConfig,
};
use anyhow::Context;
use log::info;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use color::ColorFilter;

/// A fully generated world: the tile grid, the regions partitioning it, the
/// continents grouping those regions, plus the cursor and movement state the
/// query layer maintains between turns.
///
/// Generation runs to completion before a `World` exists, so consumers never
/// observe a partially generated grid. Regeneration swaps the whole state
/// wholesale; any externally retained tile/region/entity handles from the
/// previous generation are invalid afterwards and must not be reused.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct World {
    /// The config this world was generated from. The single source of truth
    /// for every generation parameter.
    config: WorldConfig,

    grid: TileGrid,

    /// All regions, indexed by [RegionId].
    regions: Vec<Region>,

    /// All continents, indexed by [ContinentId].
    continents: Vec<Continent>,

    /// Entity arena, indexed by [EntityId]. Entities do not survive a
    /// regenerate.
    entities: Vec<Entity>,

    /// Cursor position.
    selected: GridPoint,

    /// Anchored-movement state. See [Movement].
    movement: Movement,
}

impl World {
    /// How many times `random_land_tile` redraws a random region before
    /// falling back to a deterministic scan.
    const LAND_TILE_RETRIES: usize = 8;

    /// Generate a new world with the given config. Returns an error if the
    /// config is invalid; the config is rejected before any generation work
    /// starts.
    pub fn generate(config: WorldConfig) -> anyhow::Result<Self> {
        info!("Generating world with config {:?}", config);
        config.validate().context("invalid config")?;

        let (grid, regions, continents) = timed!(
            "World generation",
            log::Level::Info,
            WorldBuilder::new(&config).generate_world()
        )?;

        let mut world = Self {
            config,
            grid,
            regions,
            continents,
            entities: Vec::new(),
            selected: GridPoint::ORIGIN,
            movement: Movement::Idle,
        };
        world.apply_color_filter(ColorFilter::Terrain);
        Ok(world)
    }

    /// Replace this world with a freshly generated one using the stored
    /// config but a new random seed, so even an untouched config produces
    /// new content. The swap is all-or-nothing: on error the old world is
    /// left untouched.
    pub fn regenerate(&mut self) -> anyhow::Result<()> {
        let mut config = self.config;
        config.seed = rand::random();
        self.regenerate_with(config)
    }

    /// Replace this world with one generated from the given config. Used to
    /// apply configuration edits: mutate a copy of [Self::config] and pass
    /// it here. On error (e.g. the edited config is invalid) the old world
    /// is left fully intact.
    pub fn regenerate_with(
        &mut self,
        config: WorldConfig,
    ) -> anyhow::Result<()> {
        *self = Self::generate(config)?;
        Ok(())
    }

    /// The config that defines this world.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Look up a tile by coordinates, wrapping toroidally. Total for all
    /// integer inputs.
    pub fn tile_at(&self, x: i32, y: i32) -> &Tile {
        self.grid.tile_at(x, y)
    }

    /// All regions, in icon-assignment order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// All continents, in seed order.
    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id.index()]
    }

    pub fn continent(&self, id: ContinentId) -> &Continent {
        &self.continents[id.index()]
    }

    /// The region owning the tile at the given point, if any.
    pub fn region_of(&self, point: GridPoint) -> Option<&Region> {
        let id = self.grid.tile_at(point.x(), point.y()).region?;
        Some(&self.regions[id.index()])
    }

    /// The continent owning the tile at the given point, if any.
    pub fn continent_of(&self, point: GridPoint) -> Option<&Continent> {
        let id = self.region_of(point)?.continent?;
        Some(&self.continents[id.index()])
    }

    /// Regions sharing at least one polygon vertex with the given region.
    pub fn adjacent_regions(&self, id: RegionId) -> &[RegionId] {
        &self.regions[id.index()].adjacent
    }

    /// The 8 tiles surrounding a point, wrapping toroidally.
    pub fn adjacent_tiles(
        &self,
        point: GridPoint,
    ) -> impl Iterator<Item = &Tile> {
        point.adjacents().map(|p| self.grid.tile_at(p.x(), p.y()))
    }

    /// Pick a uniformly random tile from a random continent's regions.
    /// Regions can legitimately own zero tiles, so this retries a bounded
    /// number of times and then scans for any non-empty region instead of
    /// spinning; `None` means the chosen continent owns no tiles at all.
    pub fn random_land_tile(
        &self,
        rng: &mut impl Rng,
    ) -> Option<GridPoint> {
        let continent = self.continents.choose(rng)?;
        for _ in 0..Self::LAND_TILE_RETRIES {
            let &rid = continent.regions.choose(rng)?;
            if let Some(&p) = self.regions[rid.index()].tiles.choose(rng) {
                return Some(p);
            }
        }
        continent
            .regions
            .iter()
            .map(|&rid| &self.regions[rid.index()])
            .find(|region| !region.tiles.is_empty())
            .and_then(|region| region.tiles.choose(rng).copied())
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }

    /// Place a new entity on the grid. Both sides of the tile/entity
    /// two-way reference are initialized together.
    pub fn spawn_entity(
        &mut self,
        icon: char,
        move_distance: u32,
        terrain: TileType,
        at: GridPoint,
    ) -> EntityId {
        let at = self.grid.wrap(at.x(), at.y());
        let id = EntityId(self.entities.len());
        self.entities.push(Entity {
            id,
            icon,
            move_distance,
            terrain,
            used_movement: 0,
            location: at,
        });
        self.grid.tile_at_mut(at.x(), at.y()).entities.push(id);
        id
    }

    /// Serializes this world into JSON, a recoverable format that can be
    /// loaded back with [World::from_json].
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> String {
        // Panic here indicates an internal bug in the data format
        serde_json::to_string(self).expect("error serializing world")
    }

    /// Deserialize a world from JSON produced by [World::to_json]. Fails if
    /// the input is malformed.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("error deserializing world")
    }

    /// Build a small all-land world with no regions or continents, for unit
    /// tests that only exercise the query/movement layer.
    #[cfg(test)]
    pub(crate) fn test_world(width: u32, height: u32) -> Self {
        let mut grid = TileGrid::new(width, height, 0);
        for tile in grid.iter_mut() {
            tile.tile_type = TileType::Land;
        }
        Self {
            config: WorldConfig {
                width,
                height,
                ..WorldConfig::default()
            },
            grid,
            regions: Vec::new(),
            continents: Vec::new(),
            entities: Vec::new(),
            selected: GridPoint::ORIGIN,
            movement: Movement::Idle,
        }
    }
}
