use crate::{
    error::Result,
    math::{Matrix, Ray, Vector4},
};

/// A pinhole camera. The canvas sits one unit in front of the eye, and the
/// view transform orients the world relative to it.
#[derive(Clone, Debug)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    /// Field of view in radians.
    pub fov: f64,
    transform: Matrix,
    inverse: Matrix,
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(480, 270, std::f64::consts::FRAC_PI_3)
    }
}

impl Camera {
    pub fn new(width: u32, height: u32, fov: f64) -> Self {
        let half_view = (fov / 2.).tan();
        let aspect = width as f64 / height as f64;
        let (half_width, half_height) = if aspect >= 1. {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            width,
            height,
            fov,
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
            half_width,
            half_height,
            pixel_size: half_width * 2. / width as f64,
        }
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

    /// Point the camera from `from` at `to`.
    pub fn look_at(self, from: Vector4, to: Vector4, up: Vector4) -> Result<Self> {
        self.with_transform(Matrix::view_transform(from, to, up))
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// The world-space ray through the center of pixel `(x, y)`, where
    /// `(0, 0)` is the top-left corner.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let xoffset = (x as f64 + 0.5) * self.pixel_size;
        let yoffset = (y as f64 + 0.5) * self.pixel_size;

        // the camera looks toward -z, so +x is on the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Vector4::point(world_x, world_y, -1.);
        let origin = self.inverse * Vector4::origin();
        Ray::new(origin, (pixel - origin).normalize())
    }
}
