use crate::math::{Matrix, Ray, Vector4, EPSILON};

/// An axis-aligned bounding box, stored by its minimum and maximum corners.
///
/// Boxes are used to cheaply reject rays before descending into a group's
/// children. An empty box (the default) contains nothing and absorbs unions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector4,
    pub max: Vector4,
}

/// Intersect a ray with one slab of a box, returning the entry and exit
/// distances along that axis. A zero direction component divides into
/// signed infinities, which the caller's min/max folding handles.
pub(crate) fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
    let tmin = (min - origin) / direction;
    let tmax = (max - origin) / direction;
    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

impl Aabb {
    pub fn new(min: Vector4, max: Vector4) -> Self {
        Self { min, max }
    }

    /// A box that contains nothing.
    pub fn empty() -> Self {
        Self {
            min: Vector4::point(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Vector4::point(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// A box that contains everything.
    pub fn infinite() -> Self {
        Self {
            min: Vector4::point(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            max: Vector4::point(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        }
    }

    /// The box of the unit cube, `[-1, 1]` on every axis.
    pub fn unit() -> Self {
        Self::new(Vector4::point(-1., -1., -1.), Vector4::point(1., 1., 1.))
    }

    /// The bounds of an infinite XZ plane: unbounded except for a thin slab in y.
    pub fn plane() -> Self {
        Self::new(
            Vector4::point(f64::NEG_INFINITY, -EPSILON, f64::NEG_INFINITY),
            Vector4::point(f64::INFINITY, EPSILON, f64::INFINITY),
        )
    }

    pub fn from_points(points: &[Vector4]) -> Self {
        let mut b = Self::empty();
        for p in points {
            b.add_point(*p);
        }
        b
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    fn is_finite(&self) -> bool {
        [self.min, self.max]
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite())
    }

    pub fn add_point(&mut self, p: Vector4) {
        self.min = Vector4::point(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Vector4::point(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut b = *self;
        b.add_point(other.min);
        b.add_point(other.max);
        b
    }

    /// The eight corners of this box.
    pub fn corners(&self) -> [Vector4; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector4::point(a.x, a.y, a.z),
            Vector4::point(a.x, a.y, b.z),
            Vector4::point(a.x, b.y, a.z),
            Vector4::point(a.x, b.y, b.z),
            Vector4::point(b.x, a.y, a.z),
            Vector4::point(b.x, a.y, b.z),
            Vector4::point(b.x, b.y, a.z),
            Vector4::point(b.x, b.y, b.z),
        ]
    }

    /// Bound this box after it has been carried through `m`, by projecting all
    /// eight corners. Unbounded boxes stay unbounded, since infinite corners
    /// cannot be pushed through a matrix.
    pub fn transform(&self, m: &Matrix) -> Self {
        if self.is_empty() {
            return *self;
        }
        if !self.is_finite() {
            return Self::infinite();
        }

        let mut b = Self::empty();
        for corner in self.corners().iter() {
            b.add_point(*m * *corner);
        }
        b
    }

    /// Slab test: does the line through this ray cross the box at all?
    pub fn intersect(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }

        let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x, self.min.x, self.max.x);
        let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y, self.min.y, self.max.y);
        let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z, self.min.z, self.max.z);
        let tn = f64::max(f64::max(xtmin, ytmin), ztmin);
        let tf = f64::min(f64::min(xtmax, ytmax), ztmax);

        tn <= tf
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn union_grows_to_cover_both() {
        let a = Aabb::new(Vector4::point(-1., -2., 0.), Vector4::point(1., 0., 3.));
        let b = Aabb::new(Vector4::point(0., -5., -1.), Vector4::point(4., -1., 1.));
        let u = a.union(&b);
        assert_eq!(u.min, Vector4::point(-1., -5., -1.));
        assert_eq!(u.max, Vector4::point(4., 0., 3.));
        assert_eq!(Aabb::empty().union(&a), a);
    }

    #[test]
    fn transform_rotated_box_bounds_all_corners() {
        let b = Aabb::unit().transform(&(Matrix::rotation_x(PI / 4.) * Matrix::rotation_y(PI / 4.)));
        assert_abs_diff_eq!(b.min, Vector4::point(-1.4142135623730951, -1.7071067811865475, -1.7071067811865475), epsilon = 1e-9);
        assert_abs_diff_eq!(b.max, Vector4::point(1.4142135623730951, 1.7071067811865475, 1.7071067811865475), epsilon = 1e-9);
    }

    #[test]
    fn transform_keeps_unbounded_and_empty_boxes() {
        let m = Matrix::rotation_z(0.3);
        assert_eq!(Aabb::plane().transform(&m), Aabb::infinite());
        assert!(Aabb::empty().transform(&m).is_empty());
    }

    #[test]
    fn slab_test_hits_and_misses() {
        let b = Aabb::new(Vector4::point(5., -2., 0.), Vector4::point(11., 4., 7.));
        let cases = [
            (Vector4::point(15., 1., 2.), Vector4::vector(-1., 0., 0.), true),
            (Vector4::point(-5., -1., 4.), Vector4::vector(1., 0., 0.), true),
            (Vector4::point(7., 6., 5.), Vector4::vector(0., -1., 0.), true),
            (Vector4::point(9., 0., 9.), Vector4::vector(0., 0., -1.), true),
            (Vector4::point(8., 2., 12.), Vector4::vector(0., 0., -1.), true),
            (Vector4::point(12., 5., 4.), Vector4::vector(-1., 0., 0.), false),
            (Vector4::point(12., 0., 0.), Vector4::vector(0., 1., 0.), false),
            (Vector4::point(-1., 1., 8.), Vector4::vector(1., 0., 0.), false),
        ];
        for (origin, direction, expected) in cases.iter() {
            let r = Ray::new(*origin, direction.normalize());
            assert_eq!(b.intersect(&r), *expected, "{:?} {:?}", origin, direction);
        }
    }

    #[test]
    fn empty_box_rejects_every_ray() {
        let r = Ray::new(Vector4::origin(), Vector4::vector(0., 0., 1.));
        assert!(!Aabb::empty().intersect(&r));
    }

    // Aim rays from far outside at random points: points inside the transformed
    // box must always be accepted, and rays pointed away along an axis past a
    // face must be rejected.
    #[test]
    fn transformed_box_accepts_exactly_entering_rays() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::translation(1., -2., 3.)
            * Matrix::rotation_y(0.7)
            * Matrix::rotation_z(-0.4)
            * Matrix::scaling(2., 0.5, 1.5);
        let b = Aabb::unit().transform(&m);

        for _ in 0..500 {
            let target = Vector4::point(
                rng.gen_range(b.min.x..b.max.x),
                rng.gen_range(b.min.y..b.max.y),
                rng.gen_range(b.min.z..b.max.z),
            );
            let origin = Vector4::point(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            let r = Ray::new(origin, (target - origin).normalize());
            assert!(b.intersect(&r));

            // a line parallel to x, offset beyond the top face, never enters
            let above = Vector4::point(origin.x, b.max.y + rng.gen_range(0.01..10.0), target.z);
            let r = Ray::new(above, Vector4::vector(1., 0., 0.));
            assert!(!b.intersect(&r));
        }
    }
}
