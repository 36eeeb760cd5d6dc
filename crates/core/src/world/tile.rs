use crate::world::{entity::EntityId, grid::GridPoint, region::RegionId};
use serde::{Deserialize, Serialize};

/// Whether a tile is open water, claimed land, or nothing yet. Every tile
/// starts as [TileType::Void]; region assignment promotes tiles to Land and
/// the sea-leveling pass demotes the leftovers to Sea, so no Void tiles
/// survive a finished generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    Void,
    Land,
    Sea,
}

/// Coarse terrain label for a tile. Mountain labels come from the mountain
/// range walk; the rest come from the climate classification table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    None,
    Desert,
    Mountain,
    Forest,
    Rainforest,
    Frozen,
}

/// One cell of the world grid. Tiles can't be constructed directly; they are
/// created blank when the grid is built and populated by each generation
/// phase in sequence. After generation they are only mutated through entity
/// placement and the color filters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tile {
    // These fields are all pub(super) so the generation pipeline and the
    // movement layer can write them directly
    /// Location of this tile in the grid. Immutable after creation.
    pub(super) position: GridPoint,

    /// Height of the tile. Mutated through the generation phases, then
    /// frozen; guaranteed to end up in `[min_altitude, max_altitude]`.
    pub(super) height: i32,

    pub(super) tile_type: TileType,

    pub(super) terrain: Terrain,

    /// Display character. Matches the owning region's icon once regions are
    /// applied to the grid.
    pub(super) icon: char,

    /// 256-color palette index, owned entirely by whichever color filter ran
    /// last.
    pub(super) color: u8,

    pub(super) temperature: i32,

    pub(super) precipitation: i32,

    /// The region this tile belongs to, if assignment succeeded. The region's
    /// tile list is the authoritative membership; this is the reverse index.
    pub(super) region: Option<RegionId>,

    /// Entities currently occupying this tile, in placement order.
    pub(super) entities: Vec<EntityId>,
}

impl Tile {
    const DEFAULT_ICON: char = '~';
    const DEFAULT_COLOR: u8 = 15;

    pub(super) fn new(position: GridPoint, height: i32) -> Self {
        Self {
            position,
            height,
            tile_type: TileType::Void,
            terrain: Terrain::None,
            icon: Self::DEFAULT_ICON,
            color: Self::DEFAULT_COLOR,
            temperature: 0,
            precipitation: 0,
            region: None,
            entities: Vec::new(),
        }
    }

    /// Revert this tile to a blank void tile at the given altitude, keeping
    /// its position. Used when region assignment fails for a tile.
    pub(super) fn reset(&mut self, min_altitude: i32) {
        *self = Self::new(self.position, min_altitude);
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn icon(&self) -> char {
        self.icon
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn precipitation(&self) -> i32 {
        self.precipitation
    }

    /// The region that owns this tile, or `None` for sea/void tiles.
    pub fn region(&self) -> Option<RegionId> {
        self.region
    }

    /// Entities currently occupying this tile.
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }
}
