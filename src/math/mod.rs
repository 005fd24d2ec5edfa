mod matrix;
mod ray;
mod vector;

pub use matrix::*;
pub use ray::*;
pub use vector::*;

/// Shared tolerance for float comparisons and surface offsets.
pub const EPSILON: f64 = 1e-8;

/// Linearly interpolate between two values.
pub fn lerp(a: f64, b: f64, c: f64) -> f64 {
    a + (b - a) * c
}

/// Calculate the transmitted direction through a surface with Snell's law.
///
/// `eye` points back along the incoming ray and `normal` faces the eye. Returns
/// `None` on total internal reflection.
pub fn refraction_vec(eye: Vector4, normal: Vector4, from_ior: f64, to_ior: f64) -> Option<Vector4> {
    let n = from_ior / to_ior;
    let cos_i = eye.dot(normal);
    let sin_t2 = n * n * (1. - cos_i * cos_i);
    if sin_t2 > 1. {
        return None;
    }

    let cos_t = (1. - sin_t2).sqrt();
    Some(normal * (n * cos_i - cos_t) - eye * n)
}
