//! Coarse terrain classification from the climate maps.

use crate::world::{
    generate::{Generate, WorldBuilder},
    tile::{Terrain, TileType},
};

use Terrain::{Desert, Forest, Frozen, None as No, Rainforest};

/// Terrain by `[precipitation][temperature]`, both clamped to [0, 9]. Cold
/// and dry is frozen, hot and dry is desert, wet and hot trends through
/// forest into rainforest; the `No` cells are combinations the climate pass
/// can't actually produce (precipitation is capped at temperature).
#[rustfmt::skip]
const TERRAIN_TABLE: [[Terrain; 10]; 10] = [
    [Frozen, Frozen, Frozen, Frozen, Desert, Desert, Desert, Desert, Desert, Desert],
    [No, Frozen, Frozen, Frozen, Desert, Desert, Desert, Desert, Desert, Desert],
    [No, No, Frozen, Frozen, Desert, Desert, Desert, Desert, Desert, Desert],
    [No, No, No, Frozen, Desert, Desert, Desert, Desert, Desert, Desert],
    [No, No, No, No, Forest, Forest, Forest, Rainforest, Rainforest, Rainforest],
    [No, No, No, No, No, Forest, Forest, Rainforest, Rainforest, Rainforest],
    [No, No, No, No, No, No, Rainforest, Rainforest, Rainforest, Rainforest],
    [No, No, No, No, No, No, No, Rainforest, Rainforest, Rainforest],
    [No, No, No, No, No, No, No, No, Rainforest, Rainforest],
    [No, No, No, No, No, No, No, No, No, Rainforest],
];

/// Label every land tile that doesn't already carry a terrain (mountain
/// ranges run first and win) using the climate lookup table.
#[derive(Debug)]
pub struct TerrainGenerator;

impl Generate for TerrainGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        for tile in world.grid.iter_mut() {
            if tile.tile_type != TileType::Land || tile.terrain != No {
                continue;
            }
            let t = tile.temperature.clamp(0, 9) as usize;
            let p = tile.precipitation.clamp(0, 9) as usize;
            tile.terrain = TERRAIN_TABLE[p][t];
        }
        Ok(())
    }
}
