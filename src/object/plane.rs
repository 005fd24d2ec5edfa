use super::{Geometry, Intersection, Intersections, Shape};
use crate::{
    acceleration::Aabb,
    math::{Ray, Vector4, EPSILON},
};

/// The infinite XZ plane through the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plane;

impl Geometry for Plane {
    fn intersect<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>) {
        // parallel and coplanar rays both miss
        if ray.direction.y.abs() < EPSILON {
            return;
        }

        xs.push(Intersection::new(-ray.origin.y / ray.direction.y, shape));
    }

    fn normal_at(&self, _point: Vector4, _u: f64, _v: f64) -> Vector4 {
        Vector4::up()
    }

    fn uv_mapping(&self, point: Vector4) -> Vector4 {
        Vector4::point(point.x, point.z, 0.)
    }

    fn bounds(&self) -> Aabb {
        Aabb::plane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_and_coplanar_rays_miss() {
        let p = Shape::plane();
        let r = Ray::new(Vector4::point(0., 10., 0.), Vector4::vector(0., 0., 1.));
        assert!(p.intersect(&r).is_empty());
        let r = Ray::new(Vector4::origin(), Vector4::vector(0., 0., 1.));
        assert!(p.intersect(&r).is_empty());
    }

    #[test]
    fn ray_from_above_and_below() {
        let p = Shape::plane();
        let r = Ray::new(Vector4::point(0., 1., 0.), Vector4::vector(0., -1., 0.));
        assert_eq!(p.intersect(&r)[0].t, 1.);
        let r = Ray::new(Vector4::point(0., -1., 0.), Vector4::vector(0., 1., 0.));
        assert_eq!(p.intersect(&r)[0].t, 1.);
    }

    #[test]
    fn normal_is_constant() {
        let p = Shape::plane();
        for point in [Vector4::origin(), Vector4::point(10., 0., -10.), Vector4::point(-5., 0., 150.)].iter() {
            assert_eq!(p.normal_at(*point, 0., 0.), Vector4::up());
        }
    }

    #[test]
    fn uv_uses_x_and_z() {
        assert_eq!(Plane.uv_mapping(Vector4::point(2.5, 0., -3.)), Vector4::point(2.5, -3., 0.));
    }
}
