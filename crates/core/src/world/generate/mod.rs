mod climate;
mod continent;
mod elevation;
mod mountain;
mod noise;
mod ocean;
mod region;
mod smooth;
mod terrain;
mod voronoi;

use crate::{
    timed,
    world::{
        generate::{
            climate::ClimateGenerator, continent::ContinentGenerator,
            elevation::ElevationGenerator, mountain::MountainGenerator,
            noise::NoiseGenerator, ocean::OceanGenerator,
            ocean::TruncationGenerator, region::RegionGenerator,
            smooth::SmoothingGenerator, terrain::TerrainGenerator,
        },
        grid::TileGrid,
        region::{Continent, Region},
    },
    WorldConfig,
};
use anyhow::Context;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::fmt::Debug;

/// A container for generating a new world. This applies a series of
/// generators in sequence, each mutating the same grid/region/continent
/// collections in place. The fields are public to allow disjoint borrowing
/// of multiple fields at once inside generators.
///
/// The phases are strictly order-dependent: each one assumes everything the
/// previous phases wrote is final. Nothing outside this module ever sees the
/// collections mid-build.
pub struct WorldBuilder {
    /// The config that deterministically controls generation: two builders
    /// with the same config produce identical worlds (on the same version of
    /// the code). Generators must not mutate it.
    pub config: WorldConfig,

    /// RNG provider, seeded from the config.
    pub rng: Pcg64,

    /// The tile grid under construction. Tiles are mutated by every phase
    /// but never added, removed, or moved.
    pub grid: TileGrid,

    /// Regions, in icon-assignment order. Populated by [RegionGenerator];
    /// later phases only mutate terrain labels and continent membership.
    pub regions: Vec<Region>,

    /// Continents, in seed order. Populated by [ContinentGenerator].
    pub continents: Vec<Continent>,
}

impl WorldBuilder {
    pub fn new(config: &WorldConfig) -> Self {
        let grid = TileGrid::new(config.width, config.height, config.min_altitude);
        info!(
            "Initialized {}x{} grid ({} tiles)",
            config.width,
            config.height,
            config.width * config.height
        );
        Self {
            config: *config,
            rng: Pcg64::seed_from_u64(config.seed),
            grid,
            regions: Vec::new(),
            continents: Vec::new(),
        }
    }

    /// Generate a world by running every generation step sequentially. Must
    /// be run from a blank slate. Outputs the finished grid, regions, and
    /// continents.
    pub fn generate_world(
        mut self,
    ) -> anyhow::Result<(TileGrid, Vec<Region>, Vec<Continent>)> {
        // Run each generation step. The order is very important!
        self.apply_generator(RegionGenerator)?;
        self.apply_generator(ContinentGenerator)?;
        self.apply_generator(ElevationGenerator)?;
        self.apply_generator(MountainGenerator)?;
        self.apply_generator(NoiseGenerator)?;
        self.apply_generator(ClimateGenerator)?;
        self.apply_generator(TerrainGenerator)?;
        self.apply_generator(SmoothingGenerator)?;
        self.apply_generator(OceanGenerator)?;
        self.apply_generator(TruncationGenerator)?;

        Ok((self.grid, self.regions, self.continents))
    }

    /// A helper to run a generation step on this builder.
    fn apply_generator(
        &mut self,
        generator: impl Debug + Generate,
    ) -> anyhow::Result<()> {
        timed!(&format!("{:?}", generator), generator.generate(self))
            .with_context(|| format!("error in {:?}", generator))
    }
}

/// A type that generates some sort of data for the world. Each phase takes
/// the builder with everything earlier phases produced and mutates it to add
/// its own data. Any error returned here means the configuration asked for
/// something impossible (e.g. more continents than seedable regions), not an
/// internal bug; bugs should panic.
trait Generate {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()>;
}
