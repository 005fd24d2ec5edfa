mod cone;
mod csg;
mod cube;
mod cylinder;
mod group;
mod plane;
mod sphere;
mod triangle;

use std::{cmp::Ordering, ptr};

use crate::{
    acceleration::Aabb,
    error::Result,
    material::Material,
    math::{Matrix, Ray, Vector4},
};

pub use cone::*;
pub use csg::*;
pub use cube::*;
pub use cylinder::*;
pub use group::*;
pub use plane::*;
pub use sphere::*;
pub use triangle::*;

/// A single crossing of a ray with a shape's surface.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    /// Signed distance along the ray, in multiples of its direction.
    pub t: f64,

    /// The leaf shape that was struck.
    pub object: &'a Shape,

    /// Barycentric coordinates of the hit. Only triangles set these.
    pub u: f64,
    pub v: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Shape) -> Self {
        Self::with_uv(t, object, 0., 0.)
    }

    pub fn with_uv(t: f64, object: &'a Shape, u: f64, v: f64) -> Self {
        Self { t, object, u, v }
    }
}

impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && ptr::eq(self.object, other.object) && self.u == other.u && self.v == other.v
    }
}

pub type Intersections<'a> = Vec<Intersection<'a>>;

/// Sort intersections by ascending distance. The sort is stable, so hits at
/// equal distances keep the order they were produced in.
pub fn sort_intersections(xs: &mut [Intersection]) {
    xs.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal));
}

/// The visible intersection: the nearest one with a non-negative distance.
pub fn hit<'a, 'b>(xs: &'b [Intersection<'a>]) -> Option<&'b Intersection<'a>> {
    xs.iter()
        .filter(|i| i.t >= 0.)
        .min_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal))
}

/// The canonical geometry of a leaf shape, expressed in its own object space.
pub trait Geometry {
    /// Push every crossing of `ray` (already in object space) onto `xs`.
    fn intersect<'a>(&self, shape: &'a Shape, ray: &Ray, xs: &mut Intersections<'a>);

    /// The object-space normal at `point`. `u`/`v` are the barycentric
    /// coordinates of the hit, if any.
    fn normal_at(&self, point: Vector4, u: f64, v: f64) -> Vector4;

    /// Flatten an object-space point into pattern coordinates.
    fn uv_mapping(&self, point: Vector4) -> Vector4;

    /// Object-space bounds.
    fn bounds(&self) -> Aabb;
}

/// The closed set of shape variants.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Cone(Cone),
    Triangle(Triangle),
    Group(Group),
    Csg(Csg),
}

/// A shape in the scene: geometry plus its transform and material.
///
/// Shapes nested inside groups or CSG nodes cache the inverse of their full
/// ancestor chain, so a hit on a deeply nested leaf can be converted between
/// world and object space without walking back up the tree. The cache is
/// rebuilt whenever a transform changes or the shape is wrapped by a parent.
#[derive(Debug, Clone)]
pub struct Shape {
    transform: Matrix,
    inverse: Matrix,
    parent_inverse: Matrix,
    world_inverse: Matrix,
    world_inverse_transpose: Matrix,
    material: Material,
    kind: ShapeKind,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        let mut shape = Self {
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
            parent_inverse: Matrix::identity(),
            world_inverse: Matrix::identity(),
            world_inverse_transpose: Matrix::identity(),
            material: Material::default(),
            kind,
        };
        shape.attach(Matrix::identity());
        shape
    }

    /// A unit sphere at the origin.
    pub fn sphere() -> Self {
        Self::new(ShapeKind::Sphere(Sphere))
    }

    /// The XZ plane.
    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane(Plane))
    }

    /// The cube spanning `[-1, 1]` on every axis.
    pub fn cube() -> Self {
        Self::new(ShapeKind::Cube(Cube))
    }

    /// A unit-radius cylinder from y = 0 to y = 1.
    pub fn cylinder(closed: bool) -> Self {
        Self::new(ShapeKind::Cylinder(Cylinder { closed }))
    }

    /// A cone with its apex at the origin, opening downward to y = -1.
    pub fn cone(closed: bool) -> Self {
        Self::new(ShapeKind::Cone(Cone { closed }))
    }

    pub fn triangle(p1: Vector4, p2: Vector4, p3: Vector4) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::new(p1, p2, p3)))
    }

    pub fn smooth_triangle(
        p1: Vector4,
        p2: Vector4,
        p3: Vector4,
        n1: Vector4,
        n2: Vector4,
        n3: Vector4,
    ) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::smooth(p1, p2, p3, n1, n2, n3)))
    }

    pub fn csg(op: CsgOp, left: Shape, right: Shape) -> Self {
        Self::new(ShapeKind::Csg(Csg::new(op, left, right)))
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    /// Set this shape's transform. Singular matrices are rejected and leave
    /// the shape untouched.
    pub fn set_transform(&mut self, m: Matrix) -> Result<()> {
        self.inverse = m.inverse()?;
        self.transform = m;
        self.attach(self.parent_inverse);
        Ok(())
    }

    pub fn with_transform(mut self, m: Matrix) -> Result<Self> {
        self.set_transform(m)?;
        Ok(self)
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Rebuild the cached world-to-object transforms of this shape and every
    /// descendant, given the world-to-object transform of its parent.
    pub(crate) fn attach(&mut self, parent_inverse: Matrix) {
        self.parent_inverse = parent_inverse;
        self.world_inverse = self.inverse * parent_inverse;
        self.world_inverse_transpose = self.world_inverse.transpose();

        let frame = self.world_inverse;
        match &mut self.kind {
            ShapeKind::Group(group) => group.attach_children(frame),
            ShapeKind::Csg(csg) => csg.attach_children(frame),
            _ => {}
        }
    }

    /// Convert a world-space point into this shape's object space.
    pub fn world_to_object(&self, point: Vector4) -> Vector4 {
        self.world_inverse * point
    }

    /// Convert an object-space normal into a world-space unit normal.
    pub fn normal_to_world(&self, normal: Vector4) -> Vector4 {
        (self.world_inverse_transpose * normal).to_vector().normalize()
    }

    /// Intersect a ray (given in this shape's parent space) with the shape.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let mut xs = Vec::new();
        self.intersect_into(ray, &mut xs);
        xs
    }

    /// Like [`Shape::intersect`], appending onto an existing list.
    pub fn intersect_into<'a>(&'a self, ray: &Ray, xs: &mut Intersections<'a>) {
        let local = ray.transform(&self.inverse);
        match &self.kind {
            ShapeKind::Sphere(g) => g.intersect(self, &local, xs),
            ShapeKind::Plane(g) => g.intersect(self, &local, xs),
            ShapeKind::Cube(g) => g.intersect(self, &local, xs),
            ShapeKind::Cylinder(g) => g.intersect(self, &local, xs),
            ShapeKind::Cone(g) => g.intersect(self, &local, xs),
            ShapeKind::Triangle(g) => g.intersect(self, &local, xs),
            ShapeKind::Group(group) => group.intersect(&local, xs),
            ShapeKind::Csg(csg) => csg.intersect(&local, xs),
        }
    }

    fn geometry(&self) -> Option<&dyn Geometry> {
        let geometry: &dyn Geometry = match &self.kind {
            ShapeKind::Sphere(g) => g,
            ShapeKind::Plane(g) => g,
            ShapeKind::Cube(g) => g,
            ShapeKind::Cylinder(g) => g,
            ShapeKind::Cone(g) => g,
            ShapeKind::Triangle(g) => g,
            ShapeKind::Group(_) | ShapeKind::Csg(_) => return None,
        };
        Some(geometry)
    }

    /// The world-space surface normal at `point`. `u`/`v` come from the
    /// intersection and only matter for smooth triangles.
    ///
    /// Groups and CSG nodes have no surface of their own and answer `+y`.
    pub fn normal_at(&self, point: Vector4, u: f64, v: f64) -> Vector4 {
        match self.geometry() {
            Some(g) => {
                let object_normal = g.normal_at(self.world_to_object(point), u, v);
                self.normal_to_world(object_normal)
            }
            None => Vector4::up(),
        }
    }

    /// Map a world-space point on the surface into pattern coordinates.
    /// Groups and CSG nodes project the object-space point onto its (x, y).
    pub fn uv_mapping(&self, point: Vector4) -> Vector4 {
        let object_point = self.world_to_object(point);
        match self.geometry() {
            Some(g) => g.uv_mapping(object_point),
            None => Vector4::point(object_point.x, object_point.y, 0.),
        }
    }

    /// Bounds in this shape's object space.
    pub fn bounds(&self) -> Aabb {
        match &self.kind {
            ShapeKind::Sphere(g) => g.bounds(),
            ShapeKind::Plane(g) => g.bounds(),
            ShapeKind::Cube(g) => g.bounds(),
            ShapeKind::Cylinder(g) => g.bounds(),
            ShapeKind::Cone(g) => g.bounds(),
            ShapeKind::Triangle(g) => g.bounds(),
            ShapeKind::Group(group) => group.bounds(),
            ShapeKind::Csg(csg) => csg.bounds(),
        }
    }

    /// Bounds in the space of this shape's parent.
    pub fn parent_space_bounds(&self) -> Aabb {
        self.bounds().transform(&self.transform)
    }
}

impl From<Group> for Shape {
    fn from(group: Group) -> Self {
        Self::new(ShapeKind::Group(group))
    }
}
