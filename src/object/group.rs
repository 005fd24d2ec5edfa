use super::{Intersections, Shape};
use crate::{
    acceleration::Aabb,
    math::{Matrix, Ray},
};

/// An ordered collection of shapes sharing one transform.
///
/// The group keeps the union of its children's bounds in its own object
/// space, grown as children are added, and skips every child when a ray
/// misses that box.
#[derive(Debug, Clone, Default)]
pub struct Group {
    children: Vec<Shape>,
    bounds: Aabb,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child. Its transform must be final: the cached bounds are
    /// computed from it here.
    pub fn add_child(&mut self, child: Shape) {
        self.bounds = self.bounds.union(&child.parent_space_bounds());
        self.children.push(child);
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub(super) fn attach_children(&mut self, frame: Matrix) {
        for child in self.children.iter_mut() {
            child.attach(frame);
        }
    }

    /// Intersect a ray already in the group's object space.
    pub(super) fn intersect<'a>(&'a self, ray: &Ray, xs: &mut Intersections<'a>) {
        if !self.bounds.intersect(ray) {
            return;
        }

        for child in self.children.iter() {
            child.intersect_into(ray, xs);
        }
    }
}

impl FromIterator<Shape> for Group {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        let mut group = Self::new();
        for child in iter {
            group.add_child(child);
        }
        group
    }
}
