//! Integer points and the dense grids addressed by them.

use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Integer location or offset on the tile grid.
///
/// The same type doubles as an absolute world coordinate and as a relative
/// offset, so the arithmetic operators never clamp or wrap.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    /// Column index, growing towards the east.
    pub x: i32,
    /// Row index, growing towards the south.
    pub y: i32,
}

impl Point {
    /// The zero offset.
    pub const ORIGIN: Point = Point::new(0, 0);

    /// Creates a new point from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean length of the offset.
    #[must_use]
    pub const fn len_squared(self) -> i32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length of the offset.
    #[must_use]
    pub fn len_euclidean(self) -> f64 {
        f64::from(self.len_squared()).sqrt()
    }

    /// Integer approximation of the Euclidean length used for sight budgets.
    ///
    /// Orthogonal steps cost 0.95 and diagonal steps cost 1.41, scaled by 100
    /// and rounded: `(46 * min + 95 * max + 25) / 100`.
    #[must_use]
    pub fn len_nethack(self) -> i32 {
        let ax = self.x.abs();
        let ay = self.y.abs();
        (46 * ax.min(ay) + 95 * ax.max(ay) + 25) / 100
    }

    /// Manhattan length of the offset.
    #[must_use]
    pub fn len_taxicab(self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Chebyshev length of the offset, i.e. the number of king moves.
    #[must_use]
    pub fn len_walking(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        *self = *self + other;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Point) {
        *self = *self - other;
    }
}

/// Dense rectangular grid addressed by [`Point`].
///
/// Reads outside the grid return the configured default instead of failing,
/// which lets sight and terrain queries probe past the edges freely. Writes
/// outside the grid are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    size: Point,
    default: T,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid of the provided size with every cell set to `default`.
    ///
    /// Negative dimensions are treated as zero.
    #[must_use]
    pub fn new(size: Point, default: T) -> Self {
        let size = Point::new(size.x.max(0), size.y.max(0));
        let capacity = usize::try_from(size.x)
            .ok()
            .zip(usize::try_from(size.y).ok())
            .and_then(|(width, height)| width.checked_mul(height))
            .unwrap_or(0);
        Self {
            size,
            cells: vec![default.clone(); capacity],
            default,
        }
    }

    /// Overwrites every in-bounds cell with `value`. The default is unchanged.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Stores `value` at `point`, returning `false` when out of bounds.
    pub fn set(&mut self, point: Point, value: T) -> bool {
        match self.index(point) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }
}

impl<T> Grid<T> {
    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> Point {
        self.size
    }

    /// Value returned for reads outside the grid.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }

    /// Reports whether the point lies inside the grid.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        0 <= point.x && point.x < self.size.x && 0 <= point.y && point.y < self.size.y
    }

    /// Reads the cell at `point`, or the default when out of bounds.
    #[must_use]
    pub fn get(&self, point: Point) -> &T {
        self.index(point)
            .and_then(|index| self.cells.get(index))
            .unwrap_or(&self.default)
    }

    /// Iterates over every in-bounds point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let Point { x: width, y: height } = self.size;
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    fn index(&self, point: Point) -> Option<usize> {
        if !self.contains(point) {
            return None;
        }
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        let width = usize::try_from(self.size.x).ok()?;
        Some(y * width + x)
    }
}
