//! World-space vector type and distance helpers.
//!
//! `Vec3` uses `f64` components, matching the host engine's coordinate
//! precision.  Range checks throughout the core compare *squared* distances
//! against squared thresholds so no square root is taken on hot paths.

use std::ops::{Add, Mul, Neg, Sub};

/// A point or direction in world space.  `y` is up.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP:   Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared euclidean distance.  Prefer this for range comparisons.
    #[inline]
    pub fn distance_squared(self, other: Vec3) -> f64 {
        (other - self).length_squared()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length of the XZ-plane projection.
    #[inline]
    pub fn horizontal_length(self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` for a degenerate input.
    pub fn normalize_or_zero(self) -> Vec3 {
        let len = self.length();
        if len < 1.0e-9 {
            Vec3::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// The XZ component only, normalised.  Used for knockback and
    /// "step away from" directions, which never push vertically.
    pub fn horizontal_direction(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z).normalize_or_zero()
    }

    /// Rotate around the vertical axis by `radians`.
    pub fn rotate_y(self, radians: f64) -> Vec3 {
        let (sin, cos) = radians.sin_cos();
        Vec3::new(
            self.x * cos - self.z * sin,
            self.y,
            self.x * sin + self.z * cos,
        )
    }

    /// `true` if `other` lies within `radius` of `self`, boundary included.
    #[inline]
    pub fn within(self, other: Vec3, radius: f64) -> bool {
        self.distance_squared(other) <= radius * radius
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
