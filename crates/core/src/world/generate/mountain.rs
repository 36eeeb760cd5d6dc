//! Mountain ranges: random walks over the region-adjacency graph whose
//! centroid-to-centroid segments get rasterized onto the grid at maximum
//! altitude.

use crate::world::{
    generate::{Generate, WorldBuilder},
    grid::GridPoint,
    region::RegionId,
    tile::Terrain,
};
use fnv::FnvHashSet;
use rand::seq::SliceRandom;

#[derive(Debug)]
pub struct MountainGenerator;

impl Generate for MountainGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let config = world.config;
        let mut segments: Vec<(GridPoint, GridPoint)> = Vec::new();

        for c in 0..world.continents.len() {
            // Regions already used by this continent's earlier ranges can't
            // be revisited, which keeps ranges from folding onto themselves
            let mut used: FnvHashSet<RegionId> = FnvHashSet::default();

            for _ in 0..config.mountains_per_continent {
                let peak = match world.continents[c]
                    .regions
                    .choose(&mut world.rng)
                {
                    Some(&peak) => peak,
                    None => continue,
                };
                world.regions[peak.index()].terrain = Terrain::Mountain;
                used.insert(peak);

                let mut current = peak;
                let mut previous = world.regions[peak.index()].centroid();
                for _ in 0..config.mountain_range_length {
                    // The walk can leave the continent; it only avoids
                    // regions this continent's ranges already touched
                    let candidates: Vec<RegionId> = world.regions
                        [current.index()]
                    .adjacent
                    .iter()
                    .copied()
                    .filter(|r| !used.contains(r))
                    .collect();
                    let next = match candidates.choose(&mut world.rng) {
                        Some(&next) => next,
                        None => break,
                    };

                    world.regions[next.index()].terrain = Terrain::Mountain;
                    used.insert(next);
                    let centroid = world.regions[next.index()].centroid();
                    segments.push((previous, centroid));
                    previous = centroid;
                    current = next;
                }
            }
        }

        // Raster: every tile lying exactly on a segment (by the truncated
        // collinearity test) becomes a peak
        for tile in world.grid.iter_mut() {
            let p = tile.position();
            if segments.iter().any(|&(a, b)| p.is_between(a, b)) {
                tile.height = config.max_altitude;
            }
        }

        // Mountain regions propagate their terrain label to their tiles
        for region in &world.regions {
            if region.terrain == Terrain::Mountain {
                for &p in &region.tiles {
                    world.grid.tile_at_mut(p.x(), p.y()).terrain =
                        Terrain::Mountain;
                }
            }
        }
        Ok(())
    }
}
