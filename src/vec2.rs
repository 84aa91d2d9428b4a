use std::fmt::Debug;
use std::ops::Add;
use std::ops::Div;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

use crate::WorldOffset;

/// A component type for [`Vec2`].
pub trait Scalar:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
}

impl Scalar for WorldOffset {
    const ZERO: Self = 0;
    const ONE: Self = 1;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
}

/// An immutable pair of components.
///
/// Integer vectors ([`CellPos`]) name cells of the life grid, real vectors ([`Point`]) name
/// locations in screen or world space.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

/// A cell of the life grid
pub type CellPos = Vec2<WorldOffset>;

/// A point in screen or world space
pub type Point = Vec2<f64>;

/// Offsets of the 8-neighbourhood, scanned with `dx` as the outer loop.
const NEIGHBORHOOD: [(WorldOffset, WorldOffset); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl<T: Scalar> Vec2<T> {
    pub const ZERO: Self = Self::new(T::ZERO, T::ZERO);
    pub const UNIT_I: Self = Self::new(T::ONE, T::ZERO);
    pub const UNIT_J: Self = Self::new(T::ZERO, T::ONE);
    pub const ONE: Self = Self::new(T::ONE, T::ONE);

    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Multiply both components by `k`
    pub fn scale(self, k: T) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    /// Divide both components by `k`. The caller makes sure that `k` isn't zero.
    pub fn divide(self, k: T) -> Self {
        Self::new(self.x / k, self.y / k)
    }

    /// Apply `f` to each component independently
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Self::new(f(self.x), f(self.y))
    }
}

impl<T: Scalar> Add for Vec2<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Scalar> Sub for Vec2<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: Scalar> Neg for Vec2<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Scalar> Mul<T> for Vec2<T> {
    type Output = Self;

    fn mul(self, k: T) -> Self::Output {
        self.scale(k)
    }
}

impl<T: Scalar> Div<T> for Vec2<T> {
    type Output = Self;

    fn div(self, k: T) -> Self::Output {
        self.divide(k)
    }
}

impl<T: Scalar> From<(T, T)> for Vec2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl CellPos {
    /// The 8 cells at Chebyshev distance 1, in a fixed row-major order.
    pub fn neighbors(self) -> impl Iterator<Item = CellPos> {
        NEIGHBORHOOD
            .into_iter()
            .map(move |(dx, dy)| Self::new(self.x + dx, self.y + dy))
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl Point {
    /// Euclidean norm
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Compute the midpoint of the current `Point` and some `other` `Point`.
    pub fn midpoint(self, other: Self) -> Self {
        self + (other - self).scale(0.5)
    }

    /// The cell containing this point
    pub fn to_cell(self) -> CellPos {
        let p = self.map(f64::floor);

        CellPos::new(p.x as WorldOffset, p.y as WorldOffset)
    }
}

impl<T: Debug> Debug for Vec2<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}
