//! The final leveling passes: sea classification and altitude truncation.

use crate::world::{
    generate::{Generate, WorldBuilder},
    tile::TileType,
};

/// Reclassify every tile that never became land as sea, clamped down to sea
/// level. This is also where tiles the partitioner degraded to void finally
/// get a real type.
#[derive(Debug)]
pub struct OceanGenerator;

impl Generate for OceanGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let sea_level = world.config.sea_level;
        for tile in world.grid.iter_mut() {
            if tile.tile_type != TileType::Land {
                tile.tile_type = TileType::Sea;
                tile.height = tile.height.min(sea_level);
            }
        }
        Ok(())
    }
}

/// Clamp every tile's height into `[min_altitude, max_altitude]`. Noise and
/// smoothing can push heights slightly past either bound; after this pass
/// the height field is frozen.
#[derive(Debug)]
pub struct TruncationGenerator;

impl Generate for TruncationGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let config = world.config;
        for tile in world.grid.iter_mut() {
            tile.height =
                tile.height.clamp(config.min_altitude, config.max_altitude);
        }
        Ok(())
    }
}
