use super::{Geometry, Intersection, Intersections, Shape};
use crate::{
    acceleration::{check_axis, Aabb},
    math::{Ray, Vector4},
};

/// An axis-aligned cube spanning `[-1, 1]` on every axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cube;

impl Geometry for Cube {
    fn intersect<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>) {
        let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x, -1., 1.);
        let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y, -1., 1.);
        let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z, -1., 1.);

        let tmin = f64::max(f64::max(xtmin, ytmin), ztmin);
        let tmax = f64::min(f64::min(xtmax, ytmax), ztmax);
        if tmin > tmax {
            return;
        }

        xs.push(Intersection::new(tmin, shape));
        xs.push(Intersection::new(tmax, shape));
    }

    fn normal_at(&self, point: Vector4, _u: f64, _v: f64) -> Vector4 {
        let (ax, ay, az) = (point.x.abs(), point.y.abs(), point.z.abs());
        let max = ax.max(ay).max(az);

        if max == ax {
            Vector4::vector(point.x, 0., 0.)
        } else if max == ay {
            Vector4::vector(0., point.y, 0.)
        } else {
            Vector4::vector(0., 0., point.z)
        }
    }

    /// Each face is mapped by the two coordinates that vary across it.
    fn uv_mapping(&self, point: Vector4) -> Vector4 {
        let (ax, ay, az) = (point.x.abs(), point.y.abs(), point.z.abs());
        let max = ax.max(ay).max(az);

        if max == ax {
            Vector4::point(point.z, point.y, 0.)
        } else if max == ay {
            Vector4::point(point.x, point.z, 0.)
        } else {
            Vector4::point(point.x, point.y, 0.)
        }
    }

    fn bounds(&self) -> Aabb {
        Aabb::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_each_face() {
        let c = Shape::cube();
        let cases = [
            (Vector4::point(5., 0.5, 0.), Vector4::vector(-1., 0., 0.), 4., 6.),
            (Vector4::point(-5., 0.5, 0.), Vector4::vector(1., 0., 0.), 4., 6.),
            (Vector4::point(0.5, 5., 0.), Vector4::vector(0., -1., 0.), 4., 6.),
            (Vector4::point(0.5, -5., 0.), Vector4::vector(0., 1., 0.), 4., 6.),
            (Vector4::point(0.5, 0., 5.), Vector4::vector(0., 0., -1.), 4., 6.),
            (Vector4::point(0.5, 0., -5.), Vector4::vector(0., 0., 1.), 4., 6.),
            (Vector4::point(0., 0.5, 0.), Vector4::vector(0., 0., 1.), -1., 1.),
        ];
        for (origin, direction, t1, t2) in cases.iter() {
            let xs = c.intersect(&Ray::new(*origin, *direction));
            assert_eq!(xs.len(), 2);
            assert_eq!((xs[0].t, xs[1].t), (*t1, *t2));
        }
    }

    #[test]
    fn ray_misses_cube() {
        let c = Shape::cube();
        let cases = [
            (Vector4::point(-2., 0., 0.), Vector4::vector(0.2673, 0.5345, 0.8018)),
            (Vector4::point(0., -2., 0.), Vector4::vector(0.8018, 0.2673, 0.5345)),
            (Vector4::point(2., 0., 2.), Vector4::vector(0., 0., -1.)),
            (Vector4::point(0., 2., 2.), Vector4::vector(0., -1., 0.)),
            (Vector4::point(2., 2., 0.), Vector4::vector(-1., 0., 0.)),
        ];
        for (origin, direction) in cases.iter() {
            assert!(c.intersect(&Ray::new(*origin, *direction)).is_empty());
        }
    }

    #[test]
    fn normal_follows_largest_component() {
        let c = Shape::cube();
        let cases = [
            (Vector4::point(1., 0.5, -0.8), Vector4::vector(1., 0., 0.)),
            (Vector4::point(-0.4, 1., -0.1), Vector4::vector(0., 1., 0.)),
            (Vector4::point(0.3, -1., -0.7), Vector4::vector(0., -1., 0.)),
            (Vector4::point(-0.6, 0.3, 1.), Vector4::vector(0., 0., 1.)),
            (Vector4::point(1., 1., 1.), Vector4::vector(1., 0., 0.)),
            (Vector4::point(-1., -1., -1.), Vector4::vector(-1., 0., 0.)),
        ];
        for (point, normal) in cases.iter() {
            assert_eq!(c.normal_at(*point, 0., 0.), *normal);
        }
    }
}
