use std::f64::consts::PI;

use super::{Geometry, Intersection, Intersections, Shape};
use crate::{
    acceleration::Aabb,
    math::{Ray, Vector4, EPSILON},
};

/// A unit-radius cylinder around the y axis, from y = 0 to y = 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cylinder {
    /// Whether the ends are capped.
    pub closed: bool,
}

/// Does the ray cross the disc of radius `radius` at height `y`, at `t`?
fn check_cap(ray: &Ray, t: f64, radius: f64) -> bool {
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    x * x + z * z <= radius * radius
}

/// The u coordinate for a point wrapped around the y axis.
pub(super) fn azimuth(point: Vector4) -> f64 {
    0.5 + (-point.x).atan2(-point.z) / (2. * PI)
}

impl Cylinder {
    fn intersect_caps<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }

        for y in [0., 1.].iter() {
            let t = (y - ray.origin.y) / ray.direction.y;
            if check_cap(ray, t, 1.) {
                xs.push(Intersection::new(t, shape));
            }
        }
    }
}

impl Geometry for Cylinder {
    fn intersect<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>) {
        let (o, d) = (ray.origin, ray.direction);
        let a = d.x * d.x + d.z * d.z;

        // rays parallel to the axis can only strike the caps
        if a.abs() >= EPSILON {
            let b = 2. * o.x * d.x + 2. * o.z * d.z;
            let c = o.x * o.x + o.z * o.z - 1.;
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
                let y = o.y + t * d.y;
                if 0. < y && y < 1. {
                    xs.push(Intersection::new(*t, shape));
                }
            }
        }

        self.intersect_caps(shape, ray, xs);
    }

    fn normal_at(&self, point: Vector4, _u: f64, _v: f64) -> Vector4 {
        let dist = point.x * point.x + point.z * point.z;
        if dist < 1. && point.y >= 1. - EPSILON {
            Vector4::vector(0., 1., 0.)
        } else if dist < 1. && point.y <= EPSILON {
            Vector4::vector(0., -1., 0.)
        } else {
            Vector4::vector(point.x, 0., point.z)
        }
    }

    fn uv_mapping(&self, point: Vector4) -> Vector4 {
        Vector4::point(azimuth(point), point.y, 0.)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(Vector4::point(-1., 0., -1.), Vector4::point(1., 1., 1.))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &Shape, origin: Vector4, direction: Vector4) -> Vec<f64> {
        s.intersect(&Ray::new(origin, direction.normalize()))
            .iter()
            .map(|i| i.t)
            .collect()
    }

    #[test]
    fn ray_misses_side() {
        let c = Shape::cylinder(false);
        assert!(ts(&c, Vector4::point(1., 0.5, 0.), Vector4::vector(0., 1., 0.)).is_empty());
        assert!(ts(&c, Vector4::point(0., 0.5, 0.), Vector4::vector(0., 1., 0.)).is_empty());
        assert!(ts(&c, Vector4::point(0., 0.5, -5.), Vector4::vector(1., 1., 1.)).is_empty());
    }

    #[test]
    fn ray_strikes_side() {
        let c = Shape::cylinder(false);
        assert_eq!(ts(&c, Vector4::point(1., 0.5, -5.), Vector4::vector(0., 0., 1.)), vec![5., 5.]);
        assert_eq!(ts(&c, Vector4::point(0., 0.5, -5.), Vector4::vector(0., 0., 1.)), vec![4., 6.]);
    }

    #[test]
    fn open_cylinder_is_truncated() {
        let c = Shape::cylinder(false);
        let cases = [
            (Vector4::point(0., 0.5, 0.), Vector4::vector(0.1, 1., 0.), 0),
            (Vector4::point(0., 1.5, -5.), Vector4::vector(0., 0., 1.), 0),
            (Vector4::point(0., -0.5, -5.), Vector4::vector(0., 0., 1.), 0),
            (Vector4::point(0., 1., -5.), Vector4::vector(0., 0., 1.), 0),
            (Vector4::point(0., 0., -5.), Vector4::vector(0., 0., 1.), 0),
            (Vector4::point(0., 0.5, -5.), Vector4::vector(0., 0., 1.), 2),
        ];
        for (origin, direction, count) in cases.iter() {
            assert_eq!(ts(&c, *origin, *direction).len(), *count);
        }
    }

    #[test]
    fn closed_cylinder_hits_caps() {
        let c = Shape::cylinder(true);
        let cases = [
            (Vector4::point(0., 2., 0.), Vector4::vector(0., -1., 0.), 2),
            (Vector4::point(0., 2., -2.), Vector4::vector(0., -1., 2.), 2),
            (Vector4::point(0., -1., -2.), Vector4::vector(0., 1., 2.), 2),
            (Vector4::point(0., 2., -5.), Vector4::vector(0., 0., 1.), 0),
        ];
        for (origin, direction, count) in cases.iter() {
            assert_eq!(ts(&c, *origin, *direction).len(), *count);
        }
    }

    #[test]
    fn normals_on_side_and_caps() {
        let c = Shape::cylinder(true);
        let cases = [
            (Vector4::point(1., 0.5, 0.), Vector4::vector(1., 0., 0.)),
            (Vector4::point(0., 0.2, -1.), Vector4::vector(0., 0., -1.)),
            (Vector4::point(0., 0., 0.), Vector4::vector(0., -1., 0.)),
            (Vector4::point(0.5, 0., 0.), Vector4::vector(0., -1., 0.)),
            (Vector4::point(0., 1., 0.5), Vector4::vector(0., 1., 0.)),
        ];
        for (point, normal) in cases.iter() {
            assert_eq!(c.normal_at(*point, 0., 0.), *normal);
        }
    }
}
