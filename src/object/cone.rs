use super::{cylinder::azimuth, Geometry, Intersection, Intersections, Shape};
use crate::{
    acceleration::Aabb,
    math::{Ray, Vector4, EPSILON},
};

/// A cone with its apex at the origin, widening to radius 1 at y = -1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cone {
    /// Whether the base is capped.
    pub closed: bool,
}

impl Cone {
    fn intersect_cap<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }

        let t = (-1. - ray.origin.y) / ray.direction.y;
        let x = ray.origin.x + t * ray.direction.x;
        let z = ray.origin.z + t * ray.direction.z;
        if x * x + z * z <= 1. {
            xs.push(Intersection::new(t, shape));
        }
    }
}

impl Geometry for Cone {
    fn intersect<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>) {
        let (o, d) = (ray.origin, ray.direction);
        let a = d.x * d.x - d.y * d.y + d.z * d.z;
        let b = 2. * o.x * d.x - 2. * o.y * d.y + 2. * o.z * d.z;
        let c = o.x * o.x - o.y * o.y + o.z * o.z;

        let in_range = |t: f64| {
            let y = o.y + t * d.y;
            -1. < y && y < 0.
        };

        if a.abs() < EPSILON {
            // parallel to one half of the cone, so it crosses the other once
            if b.abs() >= EPSILON {
                let t = -c / (2. * b);
                if in_range(t) {
                    xs.push(Intersection::new(t, shape));
                }
            }
        } else {
            let discriminant = b * b - 4. * a * c;
            if discriminant < 0. {
                return;
            }

            let root = discriminant.sqrt();
            let mut t0 = (-b - root) / (2. * a);
            let mut t1 = (-b + root) / (2. * a);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            for t in [t0, t1].iter() {
                if in_range(*t) {
                    xs.push(Intersection::new(*t, shape));
                }
            }
        }

        self.intersect_cap(shape, ray, xs);
    }

    fn normal_at(&self, point: Vector4, _u: f64, _v: f64) -> Vector4 {
        let dist = point.x * point.x + point.z * point.z;
        if dist < 1. && point.y <= -1. + EPSILON {
            Vector4::vector(0., -1., 0.)
        } else {
            Vector4::vector(point.x, dist.sqrt(), point.z)
        }
    }

    fn uv_mapping(&self, point: Vector4) -> Vector4 {
        Vector4::point(azimuth(point), point.y + 1., 0.)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(Vector4::point(-1., -1., -1.), Vector4::point(1., 0., 1.))
    }
}
