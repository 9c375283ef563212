//! Geometric value types for 2D drawing.
//!
//! All types are `Copy` values; arithmetic produces new values and never
//! mutates an operand. Screen space is y-down, with `position` of a
//! [`Rect2`] at its top-left corner.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vector2 {
    /// Zero vector (0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Unit vector (1, 1), the identity for component-wise scaling.
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a vector with both components set to `v`.
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    /// Squared length, avoids the square root.
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Unit-length copy of this vector. The zero vector stays zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            self / len
        }
    }

    /// Linear interpolation between two vectors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Component-wise product.
    #[must_use]
    pub fn component_mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Rotate around the origin by `degrees` (clockwise on a y-down screen).
    #[must_use]
    pub fn rotated(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Round each component to the nearest integer (half away from zero).
    #[must_use]
    pub fn round(self) -> Vector2i {
        Vector2i::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul for Vector2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.component_mul(rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2i> for Vector2 {
    fn from(v: Vector2i) -> Self {
        Self::new(v.x as f32, v.y as f32)
    }
}

/// A 2D vector with integer components, used for pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2i {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
}

impl Vector2i {
    /// Zero vector (0, 0).
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new integer vector.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2i {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Vector2i {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2i {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Vector2i {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Rounds like [`Vector2::round`]; out-of-range components saturate.
impl From<Vector2> for Vector2i {
    fn from(v: Vector2) -> Self {
        v.round()
    }
}

/// A rectangle defined by its top-left `position` and `size`.
///
/// Negative sizes are representable but [`Rect2::area`], [`Rect2::contains`]
/// and [`Rect2::intersects`] only give meaningful answers for non-negative
/// sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect2 {
    /// Top-left corner.
    pub position: Vector2,
    /// Width and height.
    pub size: Vector2,
}

impl Rect2 {
    /// Zero-area rectangle at the origin.
    pub const ZERO: Self = Self::new(Vector2::ZERO, Vector2::ZERO);

    /// Create a new rectangle.
    #[must_use]
    pub const fn new(position: Vector2, size: Vector2) -> Self {
        Self { position, size }
    }

    /// Create a rectangle from x, y, width and height.
    #[must_use]
    pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vector2::new(x, y), Vector2::new(width, height))
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Get the area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        self.position + self.size / 2.0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// The left and top edges are inside, the right and bottom edges are not,
    /// so adjacent rectangles never both contain a point.
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.position.x
            && point.x < self.right()
            && point.y >= self.position.y
            && point.y < self.bottom()
    }

    /// Check if two rectangles overlap with non-zero area.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.position.x < other.right()
            && other.position.x < self.right()
            && self.position.y < other.bottom()
            && other.position.y < self.bottom()
    }

    /// Overlapping region of two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.position.x.max(other.position.x);
        let top = self.position.y.max(other.position.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Self::from_xywh(left, top, right - left, bottom - top))
    }
}

/// A circle defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle2 {
    /// Center point.
    pub center: Vector2,
    /// Radius.
    pub radius: f32,
}

impl Circle2 {
    /// Create a new circle.
    #[must_use]
    pub const fn new(center: Vector2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if a point lies inside or on the circle.
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Check if two circles touch or overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let reach = self.radius + other.radius;
        (other.center - self.center).length_squared() <= reach * reach
    }

    /// Smallest axis-aligned rectangle enclosing the circle.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect2 {
        Rect2::new(
            self.center - Vector2::splat(self.radius),
            Vector2::splat(self.radius * 2.0),
        )
    }
}
