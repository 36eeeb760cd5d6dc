//! The region partitioner: converts raw Voronoi cells into bounded regions
//! and assigns every grid tile to the region whose polygon contains it.

use crate::world::{
    generate::{voronoi, voronoi::CellPolygon, Generate, WorldBuilder},
    grid::GridPoint,
    region::{Region, RegionId, REGION_ICONS},
    tile::Terrain,
};
use anyhow::ensure;
use fnv::FnvHashMap;
use log::{debug, info};
use rand::Rng;

/// Partition the grid into regions from a Voronoi diagram over random seed
/// points. Cells touching the grid border (or degenerate ones) are
/// discarded; region icons are assigned in validity-pass order from the
/// fixed alphabet.
#[derive(Debug)]
pub struct RegionGenerator;

impl Generate for RegionGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let config = world.config;
        let cells = voronoi::generate_cells(
            &mut world.rng,
            config.width,
            config.height,
            config.seed_count,
        )?;

        let valid: Vec<&CellPolygon> = cells
            .iter()
            .filter(|cell| is_valid(cell, config.width, config.height))
            .collect();
        ensure!(
            valid.len() <= REGION_ICONS.len(),
            "{} valid regions exceed the {}-symbol icon alphabet; \
             lower seed_count",
            valid.len(),
            REGION_ICONS.len()
        );

        let base_height = config.sea_level + 1;
        for (i, cell) in valid.iter().enumerate() {
            let vertices: Vec<GridPoint> = cell
                .vertices
                .iter()
                .map(|&(x, y)| GridPoint::new(x as i32, y as i32))
                .collect();
            world.regions.push(Region {
                id: RegionId(i),
                icon: REGION_ICONS[i],
                base_height,
                max_height: world
                    .rng
                    .gen_range(base_height..=config.max_altitude),
                vertices,
                tiles: Vec::new(),
                adjacent: Vec::new(),
                terrain: Terrain::None,
                continent: None,
            });
        }
        info!(
            "Partitioned grid into {} regions ({} cells discarded)",
            world.regions.len(),
            cells.len() - world.regions.len()
        );

        assign_tiles(world);
        build_adjacency(&mut world.regions);
        Ok(())
    }
}

/// Validity predicate for a raw Voronoi cell: a non-empty vertex loop whose
/// vertices all lie strictly inside the grid bounds. Hull cells come back
/// with vertices on or beyond the bounding box; either way they fail the
/// strict comparison, which is how unbounded cells get discarded.
fn is_valid(cell: &CellPolygon, width: u32, height: u32) -> bool {
    !cell.vertices.is_empty()
        && cell.vertices.iter().all(|&(x, y)| {
            0.0 < x && x < width as f64 && 0.0 < y && y < height as f64
        })
}

/// Assign every tile to the first region whose polygon contains it. Under a
/// correct Voronoi partition regions never overlap, so "first" only breaks
/// exact boundary ties. Tiles matching no region degrade to blank void at
/// minimum altitude; that's expected for everything between the valid
/// regions and the grid border.
fn assign_tiles(world: &mut WorldBuilder) {
    let config = &world.config;
    let regions = &mut world.regions;
    let mut unassigned = 0usize;

    for y in 0..config.height as i32 {
        for x in 0..config.width as i32 {
            let point = GridPoint::new(x, y);
            let tile = world.grid.tile_at_mut(x, y);
            match regions
                .iter_mut()
                .find(|region| region.contains_point(point))
            {
                Some(region) => {
                    region.tiles.push(point);
                    tile.icon = region.icon;
                    tile.region = Some(region.id);
                }
                None => {
                    tile.reset(config.min_altitude);
                    unassigned += 1;
                }
            }
        }
    }
    if unassigned > 0 {
        debug!("{} tiles outside all regions, left as void", unassigned);
    }
}

/// Two regions are adjacent iff they share at least one integer vertex.
/// Voronoi cells of neighboring sites share cell corners exactly, so bucket
/// regions by vertex and mark every pair in a bucket adjacent.
fn build_adjacency(regions: &mut [Region]) {
    let mut buckets: FnvHashMap<GridPoint, Vec<RegionId>> =
        FnvHashMap::default();
    for region in regions.iter() {
        for &vertex in &region.vertices {
            buckets.entry(vertex).or_default().push(region.id);
        }
    }
    for ids in buckets.values() {
        for &a in ids {
            for &b in ids {
                if a != b && !regions[a.index()].adjacent.contains(&b) {
                    regions[a.index()].adjacent.push(b);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_predicate() {
        let valid = CellPolygon {
            vertices: vec![(1.5, 1.0), (6.0, 2.0), (3.0, 7.5)],
        };
        assert!(is_valid(&valid, 10, 10));

        // Touching the border is out, strictly
        let clipped = CellPolygon {
            vertices: vec![(0.0, 1.0), (6.0, 2.0), (3.0, 7.5)],
        };
        assert!(!is_valid(&clipped, 10, 10));

        let outside = CellPolygon {
            vertices: vec![(1.5, 1.0), (12.0, 2.0), (3.0, 7.5)],
        };
        assert!(!is_valid(&outside, 10, 10));

        let empty = CellPolygon { vertices: vec![] };
        assert!(!is_valid(&empty, 10, 10));
    }
}
