use std::f64::consts::PI;

use super::{Geometry, Intersection, Intersections, Shape};
use crate::{
    acceleration::Aabb,
    math::{Ray, Vector4},
};

/// A unit sphere centered at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;

impl Geometry for Sphere {
    fn intersect<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>) {
        let sray = ray.origin - Vector4::origin();
        let a = ray.direction.dot(ray.direction);
        let b = 2. * ray.direction.dot(sray);
        let c = sray.dot(sray) - 1.;

        let discriminant = b * b - 4. * a * c;
        if discriminant < 0. {
            return;
        }

        // a tangent ray yields the same root twice
        let root = discriminant.sqrt();
        xs.push(Intersection::new((-b - root) / (2. * a), shape));
        xs.push(Intersection::new((-b + root) / (2. * a), shape));
    }

    fn normal_at(&self, point: Vector4, _u: f64, _v: f64) -> Vector4 {
        point - Vector4::origin()
    }

    fn uv_mapping(&self, point: Vector4) -> Vector4 {
        let d = Vector4::origin() - point;
        let u = 0.5 + d.x.atan2(d.z) / (2. * PI);
        let v = 0.5 - d.y.clamp(-1., 1.).asin() / PI;
        Vector4::point(u, v, 0.)
    }

    fn bounds(&self) -> Aabb {
        Aabb::unit()
    }
}
