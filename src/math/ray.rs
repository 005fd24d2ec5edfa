use super::{Matrix, Vector4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector4,
    pub direction: Vector4,
}

impl Ray {
    /// Instantiate a new Ray. The direction is not required to be normalized;
    /// distances along the ray are measured in multiples of it.
    pub fn new(origin: Vector4, direction: Vector4) -> Self {
        Self { origin, direction }
    }

    pub fn position(&self, t: f64) -> Vector4 {
        self.origin + self.direction * t
    }

    /// Carry this ray into the space described by `m`.
    pub fn transform(&self, m: &Matrix) -> Ray {
        Ray::new(*m * self.origin, *m * self.direction)
    }
}
