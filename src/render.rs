use std::{
    path::Path,
    sync::{Mutex, PoisonError},
    time::Instant,
};

use crossbeam::channel;
use log::{debug, info};

use crate::{
    camera::Camera,
    error::{Error, Result},
    material::Color,
    world::World,
};

/// Render options. Defaults are provided.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Number of worker threads.
    pub threads: usize,

    /// Bounce budget handed to the first `color_at` of every pixel.
    pub max_depth: u32,

    /// How many pixel jobs may wait in the queue at once.
    pub queue_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            max_depth: 5,
            queue_capacity: 1000,
        }
    }
}

/// A framebuffer of linear colors, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::black(); width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Quantize the canvas into an 8-bit image.
    pub fn to_image(&self) -> image::RgbImage {
        let mut imgbuf: image::RgbImage = image::ImageBuffer::new(self.width, self.height);

        for (i, color) in self.pixels.iter().enumerate() {
            imgbuf.put_pixel(i as u32 % self.width, i as u32 / self.width, color.to_rgb());
        }

        imgbuf
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Render `world` through `camera`.
///
/// The calling thread queues every pixel coordinate onto a bounded channel and
/// then closes it; `config.threads` workers drain the queue, trace their pixel
/// and write it into the shared canvas. Pixels finish in no particular order,
/// but each only depends on the immutable world, so the image is the same for
/// any thread count.
pub fn render(world: &World, camera: &Camera, config: &RenderConfig) -> Result<Canvas> {
    let (width, height) = (camera.width, camera.height);
    let threads = config.threads.max(1);
    info!("Rendering {}x{} with {} thread(s)", width, height, threads);
    let start_time = Instant::now();

    let canvas = Mutex::new(Canvas::new(width, height));

    crossbeam::scope(|scope| {
        let (job_tx, job_rx) = channel::bounded::<(u32, u32)>(config.queue_capacity.max(1));

        for id in 0..threads {
            let job_rx = job_rx.clone();
            let canvas = &canvas;
            scope.spawn(move |_| {
                let mut traced = 0usize;
                for (x, y) in job_rx.iter() {
                    let ray = camera.ray_for_pixel(x, y);
                    let color = world.color_at(&ray, config.max_depth);
                    canvas
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .write_pixel(x, y, color);
                    traced += 1;
                }
                debug!("worker {} traced {} pixels", id, traced);
            });
        }
        drop(job_rx);

        'queue: for y in 0..height {
            for x in 0..width {
                // every worker is gone, so nobody is left to trace the rest
                if job_tx.send((x, y)).is_err() {
                    break 'queue;
                }
            }
        }
    })
    .map_err(|_| Error::WorkerPanicked)?;

    info!("Finished rendering in {:.2?}", start_time.elapsed());

    Ok(canvas.into_inner().unwrap_or_else(PoisonError::into_inner))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::{Matrix, Vector4};

    #[test]
    fn index_past_u32_range() {
        let c = Canvas::new(70_000, 1);
        assert_eq!(c.index(69_999, 70_000), 70_000usize * 70_000 + 69_999);
    }

    #[test]
    fn canvas_starts_black_and_stores_pixels() {
        let mut c = Canvas::new(10, 20);
        assert_eq!(c.pixel_at(9, 19), Color::black());
        c.write_pixel(2, 3, Color::new(1., 0., 0.));
        assert_eq!(c.pixel_at(2, 3), Color::new(1., 0., 0.));
    }

    #[test]
    fn image_is_clamped_and_quantized() {
        let mut c = Canvas::new(2, 1);
        c.write_pixel(0, 0, Color::new(1.5, 0., 0.));
        c.write_pixel(1, 0, Color::new(0., 0.5, -0.5));
        let img = c.to_image();
        assert_eq!(*img.get_pixel(0, 0), image::Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(1, 0), image::Rgb([0, 127, 0]));
    }

    #[test]
    fn render_default_world_center_pixel() {
        let w = World::default_world();
        let camera = Camera::new(11, 11, PI / 2.)
            .with_transform(Matrix::view_transform(
                Vector4::point(0., 0., -5.),
                Vector4::origin(),
                Vector4::up(),
            ))
            .unwrap();
        let config = RenderConfig {
            threads: 3,
            queue_capacity: 4,
            ..Default::default()
        };
        let canvas = render(&w, &camera, &config).unwrap();
        assert_abs_diff_eq!(
            canvas.pixel_at(5, 5),
            Color::new(0.38066, 0.47583, 0.2855),
            epsilon = 1e-5
        );
    }
}
