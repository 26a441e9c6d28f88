//! A 2d point type, and the neighbour offsets used to walk a pixel grid.

use num::Num;
use std::ops::{Add, Sub};

/// A 2d point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point<T> {
    /// x-coordinate.
    pub x: T,
    /// y-coordinate.
    pub y: T,
}

impl<T> Point<T> {
    /// Construct a point at (x, y).
    pub fn new(x: T, y: T) -> Point<T> {
        Point::<T> { x, y }
    }
}

impl<T: Num> Add for Point<T> {
    type Output = Self;

    fn add(self, other: Point<T>) -> Point<T> {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num> Sub for Point<T> {
    type Output = Self;

    fn sub(self, other: Point<T>) -> Point<T> {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: num::NumCast> Point<T> {
    /// Converts to a Point<i64>. Panics if the cast fails.
    pub(crate) fn to_i64(&self) -> Point<i64> {
        Point::new(self.x.to_i64().unwrap(), self.y.to_i64().unwrap())
    }
}

impl Point<i64> {
    /// Returns this point as pixel coordinates if it lies in a `width * height` grid.
    pub(crate) fn in_bounds(&self, width: u32, height: u32) -> Option<Point<u32>> {
        if self.x < 0 || self.y < 0 || self.x >= i64::from(width) || self.y >= i64::from(height) {
            None
        } else {
            Some(Point::new(self.x as u32, self.y as u32))
        }
    }
}

/// Offsets of the N, S, E and W neighbours of a pixel.
#[rustfmt::skip]
pub const FOUR_NEIGHBOURS: [Point<i64>; 4] = [
    Point { x:  1, y:  0 },
    Point { x:  0, y:  1 },
    Point { x:  0, y: -1 },
    Point { x: -1, y:  0 },
];

/// Offsets of the four diagonal neighbours of a pixel.
#[rustfmt::skip]
pub const DIAGONAL_NEIGHBOURS: [Point<i64>; 4] = [
    Point { x:  1, y:  1 },
    Point { x:  1, y: -1 },
    Point { x: -1, y: -1 },
    Point { x: -1, y:  1 },
];

/// Offsets of all eight neighbours of a pixel, in row-major order.
#[rustfmt::skip]
pub const EIGHT_NEIGHBOURS: [Point<i64>; 8] = [
    Point { x: -1, y: -1 }, Point { x: 0, y: -1 }, Point { x: 1, y: -1 },
    Point { x: -1, y:  0 },                        Point { x: 1, y:  0 },
    Point { x: -1, y:  1 }, Point { x: 0, y:  1 }, Point { x: 1, y:  1 },
];

/// Returns the square of the Euclidean distance between two points.
pub(crate) fn distance_sq(p: Point<i64>, q: Point<i64>) -> i64 {
    (p.x - q.x).pow(2) + (p.y - q.y).pow(2)
}
