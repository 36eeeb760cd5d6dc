//! Regions (Voronoi-derived polygonal partitions of the grid) and the
//! continents that group them. Both are addressed by stable integer IDs
//! rather than by value: membership questions are answered with ID lookups,
//! never by comparing copies.

use crate::world::{grid::GridPoint, tile::Terrain};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Stable handle for a region. Assigned in validity-pass order during
/// partitioning and valid for the lifetime of one generated world.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "region {}", _0)]
pub struct RegionId(pub(super) usize);

impl RegionId {
    pub(super) fn index(self) -> usize {
        self.0
    }
}

/// Stable handle for a continent.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "continent {}", _0)]
pub struct ContinentId(pub(super) usize);

impl ContinentId {
    pub(super) fn index(self) -> usize {
        self.0
    }
}

/// The fixed alphabet of region icons, assigned in discovery order. A world
/// with more than 90 valid regions is a configuration error; the partitioner
/// rejects it rather than wrapping around.
pub(super) const REGION_ICONS: [char; 90] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N',
    'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
    'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3',
    '4', '5', '6', '7', '8', '9', '!', '@', '#', '$', '%', '^', '&', '*',
    '(', ')', '-', '_', '=', '+', '`', '[', '{', ']', '}', '|', '\\', '/',
    '<', ',', '.', '>', '?', ';',
];

/// A polygonal partition of the grid, derived from one bounded Voronoi cell.
/// A region owns its tiles: the tile list here is the authoritative
/// membership, and applying the region to the grid overwrites the tiles'
/// icon/height to match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Region {
    pub(super) id: RegionId,

    /// Display icon, unique per region within a world.
    pub(super) icon: char,

    /// Height floor for every tile in the region. Always `sea_level + 1`.
    pub(super) base_height: i32,

    /// Peak height for the centroid falloff, drawn uniformly from
    /// `[base_height, max_altitude]`.
    pub(super) max_height: i32,

    /// The polygon boundary, as Voronoi cell vertices truncated to integer
    /// grid coordinates. Two regions are adjacent iff they share at least one
    /// vertex.
    pub(super) vertices: Vec<GridPoint>,

    /// Positions of every tile assigned to this region.
    pub(super) tiles: Vec<GridPoint>,

    /// Regions sharing at least one vertex with this one. Computed once by
    /// the partitioner so adjacency queries don't re-scan vertex loops.
    pub(super) adjacent: Vec<RegionId>,

    /// Terrain label applied to the whole region (set by the mountain walk).
    pub(super) terrain: Terrain,

    /// The continent that claimed this region, if any.
    pub(super) continent: Option<ContinentId>,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn icon(&self) -> char {
        self.icon
    }

    pub fn base_height(&self) -> i32 {
        self.base_height
    }

    pub fn max_height(&self) -> i32 {
        self.max_height
    }

    /// The polygon boundary in grid coordinates.
    pub fn vertices(&self) -> &[GridPoint] {
        &self.vertices
    }

    /// Positions of the tiles this region owns.
    pub fn tiles(&self) -> &[GridPoint] {
        &self.tiles
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn continent(&self) -> Option<ContinentId> {
        self.continent
    }

    /// Arithmetic mean of the polygon vertices, truncated to a grid point.
    pub fn centroid(&self) -> GridPoint {
        let n = self.vertices.len().max(1) as f64;
        let sum_x: i64 = self.vertices.iter().map(|v| v.x() as i64).sum();
        let sum_y: i64 = self.vertices.iter().map(|v| v.y() as i64).sum();
        GridPoint::new(
            (sum_x as f64 / n) as i32,
            (sum_y as f64 / n) as i32,
        )
    }

    /// Even-odd point-in-polygon test against the region's vertex loop.
    /// Under a correct Voronoi partition loops never overlap, so at most one
    /// region contains any given point.
    pub fn contains_point(&self, p: GridPoint) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let (px, py) = (p.x() as f64, p.y() as f64);
        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let (xi, yi) =
                (self.vertices[i].x() as f64, self.vertices[i].y() as f64);
            let (xj, yj) =
                (self.vertices[j].x() as f64, self.vertices[j].y() as f64);
            if (yi > py) != (yj > py)
                && px < (xj - xi) * (py - yi) / (yj - yi) + xi
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// A group of adjacent regions sharing a display icon and color. Continents'
/// region sets are pairwise disjoint; the assembler enforces this during
/// growth, not just as an output property.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Continent {
    pub(super) id: ContinentId,

    /// Display icon, inherited from the seed region.
    pub(super) icon: char,

    /// Random 256-color palette index, used by the continent color filter.
    pub(super) color: u8,

    /// Member regions, seed first, then in claim order.
    pub(super) regions: Vec<RegionId>,
}

impl Continent {
    pub fn id(&self) -> ContinentId {
        self.id
    }

    pub fn icon(&self) -> char {
        self.icon
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_region(id: usize) -> Region {
        Region {
            id: RegionId(id),
            icon: REGION_ICONS[id],
            base_height: 4,
            max_height: 9,
            vertices: vec![
                GridPoint::new(0, 0),
                GridPoint::new(10, 0),
                GridPoint::new(10, 10),
                GridPoint::new(0, 10),
            ],
            tiles: Vec::new(),
            adjacent: Vec::new(),
            terrain: Terrain::None,
            continent: None,
        }
    }

    #[test]
    fn test_contains_point() {
        let region = square_region(0);
        assert!(region.contains_point(GridPoint::new(5, 5)));
        assert!(region.contains_point(GridPoint::new(1, 9)));
        assert!(!region.contains_point(GridPoint::new(11, 5)));
        assert!(!region.contains_point(GridPoint::new(-1, 5)));
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        let mut region = square_region(0);
        region.vertices.truncate(2);
        assert!(!region.contains_point(GridPoint::new(5, 5)));
    }

    #[test]
    fn test_centroid() {
        let region = square_region(0);
        assert_eq!(region.centroid(), GridPoint::new(5, 5));
    }

    #[test]
    fn test_icon_alphabet_is_unique() {
        assert_eq!(REGION_ICONS.len(), 90);
        for (i, icon) in REGION_ICONS.iter().enumerate() {
            assert!(!REGION_ICONS[..i].contains(icon), "duplicate {icon:?}");
        }
    }
}
