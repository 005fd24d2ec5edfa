use super::{Geometry, Intersection, Intersections, Shape};
use crate::{
    acceleration::Aabb,
    math::{Ray, Vector4, EPSILON},
};

/// A triangle given by three vertices, optionally with per-vertex normals
/// that are interpolated across the face.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub p1: Vector4,
    pub p2: Vector4,
    pub p3: Vector4,
    e1: Vector4,
    e2: Vector4,
    normals: [Vector4; 3],
    smooth: bool,
}

impl Triangle {
    /// A flat triangle. Its normal is fixed by the winding of the vertices.
    pub fn new(p1: Vector4, p2: Vector4, p3: Vector4) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross(e1).normalize();
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normals: [normal; 3],
            smooth: false,
        }
    }

    pub fn smooth(p1: Vector4, p2: Vector4, p3: Vector4, n1: Vector4, n2: Vector4, n3: Vector4) -> Self {
        Self {
            normals: [n1, n2, n3],
            smooth: true,
            ..Self::new(p1, p2, p3)
        }
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }
}

impl Geometry for Triangle {
    // Möller-Trumbore
    fn intersect<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>) {
        let dir_cross_e2 = ray.direction.cross(self.e2);
        let det = self.e1.dot(dir_cross_e2);
        if det.abs() < EPSILON {
            return;
        }

        let f = 1. / det;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(dir_cross_e2);
        if !(0. ..=1.).contains(&u) {
            return;
        }

        let origin_cross_e1 = p1_to_origin.cross(self.e1);
        let v = f * ray.direction.dot(origin_cross_e1);
        if v < 0. || u + v > 1. {
            return;
        }

        let t = f * self.e2.dot(origin_cross_e1);
        xs.push(Intersection::with_uv(t, shape, u, v));
    }

    fn normal_at(&self, _point: Vector4, u: f64, v: f64) -> Vector4 {
        let [n1, n2, n3] = self.normals;
        if self.smooth {
            n2 * u + n3 * v + n1 * (1. - u - v)
        } else {
            n1
        }
    }

    fn uv_mapping(&self, point: Vector4) -> Vector4 {
        Vector4::point(point.x, point.y, 0.)
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_points(&[self.p1, self.p2, self.p3])
    }
}
