//! Base elevation: apply every region to the grid, then shape each region
//! into a mound that falls off from its centroid.

use crate::world::{
    generate::{Generate, WorldBuilder},
    tile::TileType,
};

/// Apply each region's tiles to the grid (icon, land type, height floored at
/// the region's base height), then raise tiles toward the region's max
/// height with a linear falloff from the polygon centroid. The falloff only
/// ever raises, so peaks pinned earlier (continent seeds) survive.
#[derive(Debug)]
pub struct ElevationGenerator;

impl Generate for ElevationGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        for region in &world.regions {
            let centroid = region.centroid();
            for &p in &region.tiles {
                let tile = world.grid.tile_at_mut(p.x(), p.y());
                tile.icon = region.icon;
                tile.tile_type = TileType::Land;
                tile.height = tile.height.max(region.base_height);

                let falloff = (region.max_height
                    - region.base_height
                    - centroid.distance_to(p) as i32)
                    .max(0);
                tile.height = tile.height.max(region.base_height + falloff);
            }
        }
        Ok(())
    }
}
