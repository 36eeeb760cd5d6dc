//! Tessera generates discrete, toroidally-addressable world grids for
//! turn-based strategy games: a height-mapped, region-partitioned,
//! continent-grouped terrain surface, plus the spatial queries (distance,
//! adjacency, movement range, tile/entity placement) gameplay depends on.
//! Presentation layers are implemented elsewhere and consume the world
//! through read-only queries.
//!
//! ```
//! use tessera::{World, WorldConfig};
//!
//! let world = World::generate(WorldConfig::default()).unwrap();
//! println!("{}", world.tile_at(0, 0).height());
//! ```
//!
//! See [WorldConfig] for details on how generation can be customized.

mod config;
mod util;
mod world;

pub use crate::{
    config::{ClimateConfig, WorldConfig},
    world::{
        entity::{Entity, EntityId},
        grid::{Direction, GridPoint, TileGrid},
        movement::Movement,
        region::{Continent, ContinentId, Region, RegionId},
        tile::{Terrain, Tile, TileType},
        ColorFilter, World,
    },
};
