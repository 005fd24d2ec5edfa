use std::ops::{Add, AddAssign, Mul, Sub};

use approx::AbsDiffEq;

use crate::{
    error::Result,
    math::{lerp, Matrix, Vector4, EPSILON},
};

/// A linear RGB color. Components are nominally in 0-1 but may exceed that
/// range while light accumulates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn white() -> Self {
        Self::new(1., 1., 1.)
    }

    pub fn black() -> Self {
        Self::new(0., 0., 0.)
    }

    /// Instantiate a new Color.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }

    /// Clamp to 0-1 and quantize to a 24-bit pixel.
    pub fn to_rgb(self) -> image::Rgb<u8> {
        let q = |c: f64| (c.clamp(0., 1.) * 255.) as u8;
        image::Rgb([q(self.r), q(self.g), q(self.b)])
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
        )
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl AbsDiffEq for Color {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.r.abs_diff_eq(&other.r, epsilon)
            && self.g.abs_diff_eq(&other.g, epsilon)
            && self.b.abs_diff_eq(&other.b, epsilon)
    }
}

/// The shape of a pattern. Compound kinds delegate to sub-patterns, which are
/// evaluated in the compound pattern's space and then apply their own transform.
#[derive(Clone, Debug)]
pub enum PatternKind {
    /// A single flat color.
    Solid(Color),

    /// Alternating bands along x.
    Stripe(Box<Pattern>, Box<Pattern>),

    /// A 2D checkerboard over x and y.
    Checker(Box<Pattern>, Box<Pattern>),

    /// A linear blend along x, repeating every unit.
    Gradient(Box<Pattern>, Box<Pattern>),
}

/// A texture for a material, with its own transform.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub kind: PatternKind,
    transform: Matrix,
    inverse: Matrix,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::new(PatternKind::Solid(color))
    }

    pub fn stripe(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Stripe(Box::new(a), Box::new(b)))
    }

    pub fn checker(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Checker(Box::new(a), Box::new(b)))
    }

    pub fn gradient(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Gradient(Box::new(a), Box::new(b)))
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    pub fn set_transform(&mut self, m: Matrix) -> Result<()> {
        self.inverse = m.inverse()?;
        self.transform = m;
        Ok(())
    }

    pub fn with_transform(mut self, m: Matrix) -> Result<Self> {
        self.set_transform(m)?;
        Ok(self)
    }

    /// The color of this pattern at a point given in the owner's space.
    pub fn color_at(&self, point: Vector4) -> Color {
        let p = self.inverse * point;
        match &self.kind {
            PatternKind::Solid(color) => *color,
            PatternKind::Stripe(a, b) => {
                if (p.x.floor() as i64).rem_euclid(2) == 0 {
                    a.color_at(p)
                } else {
                    b.color_at(p)
                }
            }
            PatternKind::Checker(a, b) => {
                if (p.x.floor() as i64 + p.y.floor() as i64).rem_euclid(2) == 0 {
                    a.color_at(p)
                } else {
                    b.color_at(p)
                }
            }
            PatternKind::Gradient(a, b) => a.color_at(p).lerp(b.color_at(p), p.x - p.x.floor()),
        }
    }
}

impl From<Color> for Pattern {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

/// A Phong material for a shape.
#[derive(Debug, Clone)]
pub struct Material {
    /// The pattern sampled at the shape's UV-mapped hit point.
    pub pattern: Pattern,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    /// The reflectiveness (0 to 1) of this material.
    pub reflective: f64,

    /// The transparency of this object. At 1 the object is completely transparent, at 0 it
    /// is completely opaque. Transparent objects also let shadow rays through in proportion.
    pub transparency: f64,

    /// The index of refraction of this material. 1.0 is vacuum.
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pattern: Pattern::solid(Color::white()),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.,
            reflective: 0.,
            transparency: 0.,
            refractive_index: 1.,
        }
    }
}

impl Material {
    /// A clear glass material.
    pub fn glass() -> Self {
        Self {
            transparency: 1.,
            refractive_index: 1.5,
            ..Default::default()
        }
    }
}
