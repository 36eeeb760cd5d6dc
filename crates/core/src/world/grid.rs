//! Basic types and storage for the toroidal square grid.

use crate::world::tile::Tile;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// A point in the world grid. Coordinates are unbounded integers; any lookup
/// against a [TileGrid] reduces them modulo the grid bounds, so every point
/// resolves to a real tile (the world is a torus).
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Euclidean distance to another point. Distances are measured on the
    /// flat grid, not around the torus.
    pub fn distance_to(self, other: GridPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    /// Does this point lie exactly on the segment between `a` and `b`? The
    /// test compares truncated integer distances, so only lattice points that
    /// are (nearly) exactly collinear pass. This is deliberately crude: the
    /// mountain rasterizer relies on it for visual parity with the height
    /// maps it was tuned against. Do not "fix" it into a proper line draw.
    pub fn is_between(self, a: GridPoint, b: GridPoint) -> bool {
        (a.distance_to(self) + self.distance_to(b)) as i64
            == a.distance_to(b) as i64
    }

    /// Get an iterator of the 8 points surrounding this one. The points are
    /// *not* wrapped; resolve them through a [TileGrid] to land on tiles.
    pub fn adjacents(self) -> impl Iterator<Item = GridPoint> {
        Direction::iter().map(move |dir| {
            let (dx, dy) = dir.offset();
            GridPoint::new(self.x + dx, self.y + dy)
        })
    }
}

/// The 8 compass directions to a grid tile's neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    /// The (dx, dy) step this direction takes. North is -y.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::Northeast => (1, -1),
            Self::East => (1, 0),
            Self::Southeast => (1, 1),
            Self::South => (0, 1),
            Self::Southwest => (-1, 1),
            Self::West => (-1, 0),
            Self::Northwest => (-1, -1),
        }
    }
}

/// The addressable 2D array of tiles. Owns no logic beyond storage and
/// toroidal coordinate lookup; all interesting mutation happens in the
/// generation pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    /// Row-major, exactly `width * height` entries. Tiles are created once
    /// and mutated in place; they are never added, removed, or moved.
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Initialize a grid of blank void tiles at the given altitude.
    pub(super) fn new(width: u32, height: u32, min_altitude: i32) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(
                    GridPoint::new(x as i32, y as i32),
                    min_altitude,
                ));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reduce arbitrary coordinates onto the torus. Total for all `i32`
    /// inputs, including negatives and values past the bounds.
    pub fn wrap(&self, x: i32, y: i32) -> GridPoint {
        GridPoint::new(
            x.rem_euclid(self.width as i32),
            y.rem_euclid(self.height as i32),
        )
    }

    fn index(&self, x: i32, y: i32) -> usize {
        let p = self.wrap(x, y);
        (p.y() as u32 * self.width + p.x() as u32) as usize
    }

    /// Look up the tile at the given coordinates, wrapping toroidally. This
    /// never fails: every integer pair resolves to some tile.
    pub fn tile_at(&self, x: i32, y: i32) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub(super) fn tile_at_mut(&mut self, x: i32, y: i32) -> &mut Tile {
        let index = self.index(x, y);
        &mut self.tiles[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub(super) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_wrap_is_total() {
        let grid = TileGrid::new(8, 4, 0);
        assert_eq!(grid.wrap(0, 0), GridPoint::new(0, 0));
        assert_eq!(grid.wrap(8, 4), GridPoint::new(0, 0));
        assert_eq!(grid.wrap(-1, -1), GridPoint::new(7, 3));
        assert_eq!(grid.wrap(17, -9), GridPoint::new(1, 3));
        // And lookups land on tiles with the wrapped position
        assert_eq!(grid.tile_at(-1, 6).position(), GridPoint::new(7, 2));
    }

    #[test]
    fn test_distance() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(3, 4);
        assert_approx_eq!(a.distance_to(b), 5.0);
        assert_approx_eq!(b.distance_to(a), 5.0);
        assert_approx_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn test_is_between() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(2, 2);
        assert!(GridPoint::new(1, 1).is_between(a, b));
        assert!(!GridPoint::new(1, 2).is_between(a, b));
        // Endpoints count as on the segment
        assert!(a.is_between(a, b));
        assert!(b.is_between(a, b));
    }

    #[test]
    fn test_adjacents() {
        let adjacent: Vec<GridPoint> = GridPoint::ORIGIN.adjacents().collect();
        assert_eq!(adjacent.len(), 8);
        // All distinct, all within one step
        for (i, p) in adjacent.iter().enumerate() {
            assert!(p.x().abs() <= 1 && p.y().abs() <= 1);
            assert!(!adjacent[..i].contains(p));
        }
    }
}
