//! Integer pixel coordinates and axis-aligned rectangles.

use serde::{Deserialize, Serialize};

/// A pixel position. `x` is the column, `y` the row, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned rectangle, `width` x `height` pixels starting at (`x`, `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the rectangle spanning two corners, in either order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (left, right) = (a.x.min(b.x), a.x.max(b.x));
        let (top, bottom) = (a.y.min(b.y), a.y.max(b.y));
        let span = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo)) as u32;
        Self::new(left, top, span(left, right), span(top, bottom))
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_order() {
        let rect = Rect::from_corners(Point::new(250, 150), Point::new(50, 50));
        assert_eq!(rect, Rect::new(50, 50, 200, 100));
        assert_eq!(rect.right(), 250);
        assert_eq!(rect.bottom(), 150);
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(14, 14)));
        assert!(!rect.contains(Point::new(15, 14)));
        assert!(!rect.contains(Point::new(9, 12)));
    }
}
