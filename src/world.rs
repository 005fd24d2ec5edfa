use std::ptr;

use crate::{
    lighting::{lighting, PointLight},
    material::{Color, Material, Pattern},
    math::{refraction_vec, Matrix, Ray, Vector4, EPSILON},
    object::{hit, Intersection, Intersections, Shape},
};

/// World options. Defaults are provided.
#[derive(Debug, Clone)]
pub struct WorldOptions {
    /// How many times a ray may bounce (reflect or refract) from a primary ray.
    pub max_depth: u32,

    /// The color of rays that hit nothing.
    pub background: Color,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            max_depth: 5,
            background: Color::black(),
        }
    }
}

/// A world, which contains a list of top-level shapes and the lights that
/// illuminate them.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub objects: Vec<Shape>,
    pub lights: Vec<PointLight>,
    pub options: WorldOptions,
}

/// Everything the shader needs to know about one hit, computed up front.
#[derive(Debug, Clone, Copy)]
pub struct Computations<'a> {
    pub t: f64,
    pub object: &'a Shape,
    pub point: Vector4,
    /// The point nudged off the surface, for rays leaving it.
    pub over_point: Vector4,
    /// The point nudged into the surface, for rays transmitted through it.
    pub under_point: Vector4,
    pub eye: Vector4,
    pub normal: Vector4,
    pub reflect: Vector4,
    /// Whether the ray started inside the shape. The normal is flipped to
    /// face the eye when it did.
    pub inside: bool,
    /// Refractive index of the material the ray is leaving.
    pub n1: f64,
    /// Refractive index of the material the ray is entering.
    pub n2: f64,
}

impl<'a> Computations<'a> {
    /// Prepare the hit `i` of `ray`. `xs` is the full sorted intersection
    /// list the hit came from, which is replayed to find the refractive
    /// indices on either side of it.
    pub fn prepare(i: &Intersection<'a>, ray: &Ray, xs: &[Intersection<'a>]) -> Self {
        let point = ray.position(i.t);
        let eye = -ray.direction;
        let mut normal = i.object.normal_at(point, i.u, i.v);

        let inside = normal.dot(eye) < 0.;
        if inside {
            normal = -normal;
        }

        let (n1, n2) = refractive_indices(i, xs);

        Self {
            t: i.t,
            object: i.object,
            point,
            over_point: point + normal * EPSILON,
            under_point: point - normal * EPSILON,
            eye,
            normal,
            reflect: ray.direction.reflect(normal),
            inside,
            n1,
            n2,
        }
    }

    /// Schlick's approximation of the fraction of light reflected at this
    /// boundary.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eye.dot(self.normal);

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n * n * (1. - cos * cos);
            if sin2_t > 1. {
                return 1.;
            }
            cos = (1. - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1. - r0) * (1. - cos).powi(5)
    }
}

/// Walk the sorted intersections up to `target`, keeping a stack of the
/// shapes the ray is currently inside.
fn refractive_indices(target: &Intersection, xs: &[Intersection]) -> (f64, f64) {
    let top = |containers: &[&Shape]| {
        containers
            .last()
            .map_or(1., |s| s.material().refractive_index)
    };

    let mut containers: Vec<&Shape> = Vec::new();
    let mut n1 = 1.;
    for i in xs {
        n1 = top(&containers);

        match containers.iter().position(|s| ptr::eq(*s, i.object)) {
            Some(index) => {
                containers.remove(index);
            }
            None => containers.push(i.object),
        }

        if i == target {
            return (n1, top(&containers));
        }
    }

    (n1, top(&containers))
}

impl World {
    pub fn new(options: WorldOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Two concentric spheres lit from the upper left.
    pub fn default_world() -> Self {
        let outer = Shape::sphere().with_material(Material {
            pattern: Pattern::solid(Color::new(0.8, 1.0, 0.6)),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });
        let mut inner = Shape::sphere();
        // a non-zero scaling never fails to invert
        let _ = inner.set_transform(Matrix::scaling(0.5, 0.5, 0.5));

        Self {
            objects: vec![outer, inner],
            lights: vec![PointLight::default()],
            options: WorldOptions::default(),
        }
    }

    pub fn add_object(&mut self, shape: Shape) {
        self.objects.push(shape);
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Every crossing of `ray` with the world, sorted by distance.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let mut xs = Vec::new();
        for object in self.objects.iter() {
            object.intersect_into(ray, &mut xs);
        }
        crate::object::sort_intersections(&mut xs);
        xs
    }

    /// Trace out a ray, getting its color. `remaining` is the bounce budget;
    /// once it runs out the ray contributes black.
    pub fn color_at(&self, ray: &Ray, remaining: u32) -> Color {
        if remaining == 0 {
            return Color::black();
        }

        let xs = self.intersect(ray);
        match hit(&xs) {
            Some(i) => {
                let comps = Computations::prepare(i, ray, &xs);
                self.shade_hit(&comps, remaining)
            }
            None => self.options.background,
        }
    }

    /// The color at a prepared hit: direct lighting from every light plus
    /// the reflected and refracted contributions.
    pub fn shade_hit(&self, comps: &Computations, remaining: u32) -> Color {
        let mut surface = Color::black();
        for light in self.lights.iter() {
            let shade = self.shade_factor(comps.over_point, light);
            surface += lighting(
                comps.object,
                light,
                comps.point,
                comps.eye,
                comps.normal,
                shade,
            );
        }

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        let material = comps.object.material();
        if material.reflective > 0. && material.transparency > 0. {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1. - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// How much of `light` reaches `point`, from 1 (unobstructed) down to 0.
    /// Each distinct shape between the two attenuates the light by its
    /// transparency.
    pub fn shade_factor(&self, point: Vector4, light: &PointLight) -> f64 {
        let to_light = light.position - point;
        let distance = to_light.magnitude();
        let ray = Ray::new(point, to_light.normalize());

        let mut occluders: Vec<&Shape> = Vec::new();
        let mut shade = 1.;
        for i in self.intersect(&ray) {
            if i.t >= distance {
                break;
            }
            if i.t > 0. && !occluders.iter().any(|s| ptr::eq(*s, i.object)) {
                occluders.push(i.object);
                shade *= i.object.material().transparency;
            }
        }

        shade
    }

    pub fn reflected_color(&self, comps: &Computations, remaining: u32) -> Color {
        let reflective = comps.object.material().reflective;
        if reflective == 0. {
            return Color::black();
        }

        let ray = Ray::new(comps.over_point, comps.reflect);
        self.color_at(&ray, remaining.saturating_sub(1)) * reflective
    }

    pub fn refracted_color(&self, comps: &Computations, remaining: u32) -> Color {
        let transparency = comps.object.material().transparency;
        if transparency == 0. {
            return Color::black();
        }

        match refraction_vec(comps.eye, comps.normal, comps.n1, comps.n2) {
            Some(direction) => {
                let ray = Ray::new(comps.under_point, direction);
                self.color_at(&ray, remaining.saturating_sub(1)) * transparency
            }
            // total internal reflection
            None => Color::black(),
        }
    }
}
