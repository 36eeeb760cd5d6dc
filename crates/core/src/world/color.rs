//! Color filters: pure, idempotent presentation passes over the finished
//! grid. Each filter fully overwrites every tile's color index, so switching
//! filters leaves no residue from the previous one.

use crate::world::{
    tile::{Terrain, Tile, TileType},
    World,
};
use serde::{Deserialize, Serialize};

// 256-color palette lookup tables, indexed by tile height (clamped)
const FOREST_COLORS: &[u8] = &[23, 29, 22, 28, 34, 40, 46, 47, 48];
const OCEAN_COLORS: &[u8] = &[17, 18, 19, 20, 21, 33, 45, 201, 201, 201];
const MOUNTAIN_COLORS: &[u8] =
    &[201, 201, 201, 233, 235, 237, 241, 248, 252, 255];
const DESERT_COLORS: &[u8] =
    &[3, 186, 190, 226, 227, 228, 229, 230, 252, 255];
const RAINFOREST_COLORS: &[u8] = &[24, 30, 36, 35, 41, 47, 83, 77];
const FROZEN_COLORS: &[u8] = &[63, 69, 75, 81, 87, 253, 255];

// Indexed by tile temperature/precipitation (clamped)
const TEMPERATURE_COLORS: &[u8] =
    &[15, 195, 87, 86, 84, 46, 40, 190, 226, 184, 178];
const PRECIPITATION_COLORS: &[u8] =
    &[224, 222, 227, 190, 119, 120, 48, 46, 34, 28, 22];

// Land at or above this height renders with the mountain palette
const MOUNTAIN_COLOR_HEIGHT: i32 = 6;

/// The available color filters. Exactly one is "active" at a time in the
/// sense that the last one applied owns every tile's color field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFilter {
    /// Per-terrain palettes, shaded by height. The default.
    Terrain,
    /// Land colored by owning continent, water by the terrain palette.
    Continent,
    /// Land colored by temperature, water by the terrain palette.
    Heat,
    /// Land colored by precipitation, water by the terrain palette.
    Precipitation,
}

/// Index a palette by a value, clamping into bounds instead of panicking on
/// out-of-domain heights or climate scalars.
fn pick(table: &[u8], index: i32) -> u8 {
    table[index.clamp(0, table.len() as i32 - 1) as usize]
}

fn terrain_color(tile: &Tile) -> u8 {
    let table = if tile.tile_type != TileType::Land {
        OCEAN_COLORS
    } else if tile.height >= MOUNTAIN_COLOR_HEIGHT {
        MOUNTAIN_COLORS
    } else {
        match tile.terrain {
            Terrain::Desert => DESERT_COLORS,
            Terrain::Rainforest => RAINFOREST_COLORS,
            Terrain::Frozen => FROZEN_COLORS,
            Terrain::Forest | Terrain::Mountain | Terrain::None => {
                FOREST_COLORS
            }
        }
    };
    pick(table, tile.height)
}

impl World {
    /// Recolor every tile according to the given filter. Pure and
    /// idempotent: the result depends only on the world's frozen terrain
    /// data and the chosen filter, never on previously applied filters.
    pub fn apply_color_filter(&mut self, filter: ColorFilter) {
        match filter {
            ColorFilter::Terrain => {
                for tile in self.grid.iter_mut() {
                    tile.color = terrain_color(tile);
                }
            }
            ColorFilter::Continent => {
                // Start from the terrain base so water and unclaimed land
                // are still covered, then overlay continent colors
                let mut colors: Vec<(i32, i32, u8)> = Vec::new();
                for continent in &self.continents {
                    for &rid in &continent.regions {
                        for &p in &self.regions[rid.index()].tiles {
                            colors.push((p.x(), p.y(), continent.color));
                        }
                    }
                }
                for tile in self.grid.iter_mut() {
                    tile.color = terrain_color(tile);
                }
                for (x, y, color) in colors {
                    self.grid.tile_at_mut(x, y).color = color;
                }
            }
            ColorFilter::Heat => {
                for tile in self.grid.iter_mut() {
                    tile.color = if tile.tile_type == TileType::Land {
                        pick(TEMPERATURE_COLORS, tile.temperature)
                    } else {
                        terrain_color(tile)
                    };
                }
            }
            ColorFilter::Precipitation => {
                for tile in self.grid.iter_mut() {
                    tile.color = if tile.tile_type == TileType::Land {
                        pick(PRECIPITATION_COLORS, tile.precipitation)
                    } else {
                        terrain_color(tile)
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::GridPoint;

    #[test]
    fn test_pick_clamps() {
        assert_eq!(pick(FROZEN_COLORS, -5), FROZEN_COLORS[0]);
        assert_eq!(pick(FROZEN_COLORS, 3), FROZEN_COLORS[3]);
        assert_eq!(pick(FROZEN_COLORS, 99), *FROZEN_COLORS.last().unwrap());
    }

    #[test]
    fn test_filters_fully_overwrite() {
        let mut world = World::test_world(6, 6);
        world.grid.tile_at_mut(0, 0).tile_type = TileType::Sea;
        world.grid.tile_at_mut(1, 0).temperature = 4;

        world.apply_color_filter(ColorFilter::Heat);
        let heat: Vec<u8> = world.grid.iter().map(Tile::color).collect();

        // A different filter recolors, and re-applying heat restores every
        // tile exactly (no residue in either direction)
        world.apply_color_filter(ColorFilter::Terrain);
        world.apply_color_filter(ColorFilter::Heat);
        let again: Vec<u8> = world.grid.iter().map(Tile::color).collect();
        assert_eq!(heat, again);

        // Sea tiles get a real color from the heat filter too
        let sea = world.tile_at(0, 0);
        assert_eq!(sea.position(), GridPoint::ORIGIN);
        assert_eq!(sea.color(), terrain_color(sea));
    }
}
