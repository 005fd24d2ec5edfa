use crate::{material::Color, math::Vector4};

/// A point light, which emits equally in all directions from a position and
/// never falls off with distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector4,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Vector4, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vector4::point(-10., 10., -10.), Color::white())
    }
}
