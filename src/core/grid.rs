//! Grid Geometry
//!
//! Integer grid positions, field bounds and the reach test shared by
//! coin pickup and player collision.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Default field width (cells).
pub const DEFAULT_FIELD_WIDTH: i32 = 100;

/// Default field height (cells).
pub const DEFAULT_FIELD_HEIGHT: i32 = 100;

/// Divisor applied to `score²` to get the squared reach.
pub const REACH_DIVISOR: f64 = 100.0;

/// Integer cell coordinate. `y` grows downwards.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridPos {
    /// Origin cell
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a step.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Squared Euclidean distance to another cell.
    ///
    /// Returned as `f64` because it is subtracted from scores directly.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        (dx * dx + dy * dy) as f64
    }
}

impl fmt::Debug for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Squared reach for a given score: `score² / 100`.
#[inline]
pub fn reach_squared(score: f64) -> f64 {
    score * score / REACH_DIVISOR
}

/// Is `target` within the reach of something of `score` centred on `center`?
#[inline]
pub fn within_reach(target: GridPos, center: GridPos, score: f64) -> bool {
    target.distance_squared(center) <= reach_squared(score)
}

/// Field dimensions.
///
/// Movement accepts `0..=width` / `0..=height`; spawning samples
/// `0..width` / `0..height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    /// Maximum x coordinate for movement
    pub width: i32,
    /// Maximum y coordinate for movement
    pub height: i32,
}

impl Default for FieldSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

impl FieldSize {
    /// Create a field of the given size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Can a player step onto this cell?
    #[inline]
    pub fn allows_move_to(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x <= self.width && pos.y <= self.height
    }

    /// Number of cells coins may spawn on.
    pub fn spawn_cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// All spawnable cells, row by row.
    pub fn spawn_cells(&self) -> impl Iterator<Item = GridPos> {
        let width = self.width.max(0);
        let height = self.height.max(0);
        (0..height).flat_map(move |y| (0..width).map(move |x| GridPos::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_squared() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(b.distance_squared(a), 25.0);
        assert_eq!(a.distance_squared(a), 0.0);
    }

    #[test]
    fn test_reach() {
        // score 50 -> reach² 25
        assert_eq!(reach_squared(50.0), 25.0);
        assert!(within_reach(GridPos::new(3, 4), GridPos::ZERO, 50.0));
        assert!(!within_reach(GridPos::new(3, 5), GridPos::ZERO, 50.0));

        // score 1 only reaches its own cell
        assert!(within_reach(GridPos::ZERO, GridPos::ZERO, 1.0));
        assert!(!within_reach(GridPos::new(1, 0), GridPos::ZERO, 1.0));
    }

    #[test]
    fn test_move_bounds_are_inclusive() {
        let field = FieldSize::default();
        assert!(field.allows_move_to(GridPos::new(0, 0)));
        assert!(field.allows_move_to(GridPos::new(100, 100)));
        assert!(!field.allows_move_to(GridPos::new(-1, 5)));
        assert!(!field.allows_move_to(GridPos::new(5, -1)));
        assert!(!field.allows_move_to(GridPos::new(101, 5)));
        assert!(!field.allows_move_to(GridPos::new(5, 101)));
    }

    #[test]
    fn test_spawn_cells() {
        let field = FieldSize::new(3, 2);
        let cells: Vec<_> = field.spawn_cells().collect();
        assert_eq!(cells.len(), field.spawn_cell_count());
        assert_eq!(cells[0], GridPos::new(0, 0));
        assert_eq!(cells[1], GridPos::new(1, 0));
        assert_eq!(cells[5], GridPos::new(2, 1));

        assert_eq!(FieldSize::new(0, 10).spawn_cells().count(), 0);
    }
}
