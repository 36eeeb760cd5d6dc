//! The geometry provider: uniformly random seed points and the planar
//! Voronoi diagram over them. This is pure computational geometry; nothing
//! here interprets grid semantics. The actual diagram is delegated to the
//! `voronator` crate. Cells of hull sites come back with vertices on or
//! beyond the bounding box; either way those vertices are not strictly
//! inside the grid, so the partitioner's strictly-inside validity test is
//! what identifies and discards such cells, playing the role of an explicit
//! "unbounded cell" sentinel.

use anyhow::anyhow;
use rand::Rng;
use voronator::{delaunator::Point, VoronoiDiagram};

/// The vertex loop of one Voronoi cell, in diagram (f64) coordinate space.
/// May be empty for degenerate sites (e.g. duplicated seed points).
pub struct CellPolygon {
    pub vertices: Vec<(f64, f64)>,
}

/// Generate `seed_count` uniformly random integer points inside
/// `[0, width) x [0, height)` and return the vertex loop of every cell of
/// their Voronoi diagram.
pub fn generate_cells(
    rng: &mut impl Rng,
    width: u32,
    height: u32,
    seed_count: u32,
) -> anyhow::Result<Vec<CellPolygon>> {
    let points: Vec<(f64, f64)> = (0..seed_count)
        .map(|_| {
            (
                rng.gen_range(0..width) as f64,
                rng.gen_range(0..height) as f64,
            )
        })
        .collect();

    let diagram = VoronoiDiagram::<Point>::from_tuple(
        &(0.0, 0.0),
        &(width as f64, height as f64),
        &points,
    )
    .ok_or_else(|| {
        anyhow!("voronoi computation failed for {} seed points", seed_count)
    })?;

    Ok(diagram
        .cells()
        .iter()
        .map(|cell| CellPolygon {
            vertices: cell.points().iter().map(|p| (p.x, p.y)).collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_cells_cover_all_sites() {
        let mut rng = Pcg64::seed_from_u64(12345);
        let cells = generate_cells(&mut rng, 80, 40, 50).unwrap();
        // One cell per (distinct) site; duplicates may collapse
        assert!(!cells.is_empty());
        assert!(cells.len() <= 50);

        let strictly_inside = |cell: &CellPolygon| {
            !cell.vertices.is_empty()
                && cell
                    .vertices
                    .iter()
                    .all(|&(x, y)| 0.0 < x && x < 80.0 && 0.0 < y && y < 40.0)
        };
        // Hull cells carry vertices on or beyond the bounding box; interior
        // cells stay strictly inside. Both kinds must be present for the
        // partitioner's validity split to mean anything.
        assert!(cells.iter().any(strictly_inside));
        assert!(cells.iter().any(|cell| !strictly_inside(cell)));
    }
}
