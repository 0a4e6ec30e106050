use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 3D vector for unit-sphere lattice math
///
/// Double precision throughout: lot positions must agree bit-for-bit across
/// every consumer that recomputes them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    /// North pole of the unit sphere (lot 1 of every lattice)
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const DOWN: Vec3 = Vec3 { x: 0.0, y: -1.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn from_array(v: [f64; 3]) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn length_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    #[inline]
    pub fn dot(&self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn distance_sq_to(&self, other: Vec3) -> f64 {
        (*self - other).length_sq()
    }

    /// Great-circle angle between two unit vectors in radians
    ///
    /// The dot product is clamped to [-1, 1] so rounding noise on nearly
    /// parallel vectors never produces NaN.
    #[inline]
    pub fn angle_to(&self, other: Vec3) -> f64 {
        self.dot(other).clamp(-1.0, 1.0).acos()
    }

    /// Latitude in radians, measured from the equator toward +y
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.y.clamp(-1.0, 1.0).asin()
    }

    /// Longitude in radians in [0, 2π), measured in the x/z plane from +x toward +z
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.z.atan2(self.x).rem_euclid(std::f64::consts::TAU)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Check if approximately equal to another vector
    pub fn approx_eq(&self, other: Vec3, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_length() {
        let v = Vec3::new(2.0, 3.0, 6.0);
        assert!(approx_eq(v.length(), 7.0));
        assert!(approx_eq(v.length_sq(), 49.0));
    }

    #[test]
    fn test_normalize() {
        let n = Vec3::new(0.0, 3.0, 4.0).normalize();
        assert!(approx_eq(n.length(), 1.0));
        assert!(approx_eq(n.y, 0.6));
        assert!(approx_eq(n.z, 0.8));
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_angle_to_clamps() {
        let a = Vec3::UP;
        // Slightly longer than unit: raw dot exceeds 1.0
        let b = Vec3::new(0.0, 1.0 + 1e-15, 0.0);
        assert_eq!(a.angle_to(b), 0.0);
        assert!(approx_eq(Vec3::UP.angle_to(Vec3::DOWN), PI));
    }

    #[test]
    fn test_latitude_longitude() {
        assert!(approx_eq(Vec3::UP.latitude(), PI / 2.0));
        assert!(approx_eq(Vec3::new(1.0, 0.0, 0.0).longitude(), 0.0));
        assert!(approx_eq(Vec3::new(0.0, 0.0, 1.0).longitude(), PI / 2.0));
        assert!(approx_eq(Vec3::new(0.0, 0.0, -1.0).longitude(), 1.5 * PI));
    }

    #[test]
    fn test_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert!(approx_eq(a.dot(b), 32.0));
        assert!(approx_eq(a.distance_sq_to(b), 27.0));
    }

    #[test]
    fn test_array_roundtrip() {
        let v = Vec3::from_array([0.5, -0.25, 0.125]);
        assert_eq!(v.to_array(), [0.5, -0.25, 0.125]);
    }

    #[test]
    fn test_serde() {
        let v = Vec3::new(1.5, 2.5, -3.5);
        let encoded = serde_json::to_string(&v).unwrap();
        let decoded: Vec3 = serde_json::from_str(&encoded).unwrap();
        assert_eq!(v, decoded);
    }
}
