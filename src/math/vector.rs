use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use approx::AbsDiffEq;

use super::EPSILON;

/// A homogeneous coordinate in 3D space. Points carry `w = 1`, vectors `w = 0`.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector4 {
    /// Instantiate a new Vector4.
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// A position in space.
    pub fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.)
    }

    /// A direction in space.
    pub fn vector(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0.)
    }

    pub fn origin() -> Self {
        Self::point(0., 0., 0.)
    }

    pub fn up() -> Self {
        Self::vector(0., 1., 0.)
    }

    pub fn is_point(self) -> bool {
        self.w == 1.
    }

    /// Find the dot product between two Vector4s.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Cross two vectors. The `w` component is ignored and the result is a vector.
    pub fn cross(self, other: Self) -> Self {
        Self::vector(
            self.y * other.z - self.z * other.y,
            -self.x * other.z + self.z * other.x,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Find the magnitude of this Vector4.
    pub fn magnitude(self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2) + self.w.powi(2)).sqrt()
    }

    /// Normalize this Vector4 by dividing it by its own magnitude.
    pub fn normalize(self) -> Self {
        self / self.magnitude()
    }

    /// Reflect this vector around a normal.
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2. * self.dot(normal))
    }

    /// Drop the homogeneous component, turning the value into a vector.
    pub fn to_vector(self) -> Self {
        Self { w: 0., ..self }
    }
}

impl Add for Vector4 {
    type Output = Vector4;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl AddAssign for Vector4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector4 {
    type Output = Vector4;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl Neg for Vector4 {
    type Output = Vector4;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

impl Mul<f64> for Vector4 {
    type Output = Vector4;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            w: self.w * rhs,
        }
    }
}

impl Div<f64> for Vector4 {
    type Output = Vector4;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
            w: self.w / rhs,
        }
    }
}

impl AbsDiffEq for Vector4 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn point_minus_point_is_vector() {
        let v = Vector4::point(3., 2., 1.) - Vector4::point(5., 6., 7.);
        assert_eq!(v, Vector4::vector(-2., -4., -6.));
        assert!(!v.is_point());
    }

    #[test]
    fn cross_product_follows_right_hand_rule() {
        let a = Vector4::vector(1., 2., 3.);
        let b = Vector4::vector(2., 3., 4.);
        assert_eq!(a.cross(b), Vector4::vector(-1., 2., -1.));
        assert_eq!(b.cross(a), Vector4::vector(1., -2., 1.));
    }

    #[test]
    fn normalized_vector_has_unit_length() {
        let v = Vector4::vector(1., 2., 3.).normalize();
        assert_abs_diff_eq!(v.magnitude(), 1., epsilon = EPSILON);
    }

    #[test]
    fn reflect_off_slanted_surface() {
        let v = Vector4::vector(0., -1., 0.);
        let n = Vector4::vector(2f64.sqrt() / 2., 2f64.sqrt() / 2., 0.);
        assert_abs_diff_eq!(v.reflect(n), Vector4::vector(1., 0., 0.));
    }
}
