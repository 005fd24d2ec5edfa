use super::{sort_intersections, Intersections, Shape};
use crate::{
    acceleration::Aabb,
    math::{Matrix, Ray},
};

/// A boolean operation combining two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOp {
    Union,
    Intersection,
    Difference,
}

impl CsgOp {
    /// Should a crossing survive? `left_hit` says which operand was struck;
    /// `in_left`/`in_right` track whether the ray is currently inside each.
    pub fn allows(self, left_hit: bool, in_left: bool, in_right: bool) -> bool {
        match self {
            CsgOp::Union => (left_hit && !in_right) || (!left_hit && !in_left),
            CsgOp::Intersection => (left_hit && in_right) || (!left_hit && in_left),
            CsgOp::Difference => (left_hit && !in_right) || (!left_hit && in_left),
        }
    }
}

/// Constructive solid geometry: two operands and the operation joining them.
#[derive(Debug, Clone)]
pub struct Csg {
    op: CsgOp,
    left: Box<Shape>,
    right: Box<Shape>,
    bounds: Aabb,
}

impl Csg {
    pub fn new(op: CsgOp, left: Shape, right: Shape) -> Self {
        let bounds = left.parent_space_bounds().union(&right.parent_space_bounds());
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
            bounds,
        }
    }

    pub fn op(&self) -> CsgOp {
        self.op
    }

    pub fn left(&self) -> &Shape {
        &self.left
    }

    pub fn right(&self) -> &Shape {
        &self.right
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub(super) fn attach_children(&mut self, frame: Matrix) {
        self.left.attach(frame);
        self.right.attach(frame);
    }

    /// Intersect a ray already in this node's object space. Each operand's
    /// crossings are sorted on their own, then walked together in distance
    /// order while tracking which operands the ray is inside.
    pub(super) fn intersect<'a>(&'a self, ray: &Ray, xs: &mut Intersections<'a>) {
        if !self.bounds.intersect(ray) {
            return;
        }

        let mut left = self.left.intersect(ray);
        let mut right = self.right.intersect(ray);
        sort_intersections(&mut left);
        sort_intersections(&mut right);

        let (mut in_left, mut in_right) = (false, false);
        let (mut l, mut r) = (0, 0);
        while l < left.len() || r < right.len() {
            let left_hit = r >= right.len() || (l < left.len() && left[l].t <= right[r].t);
            let i = if left_hit {
                l += 1;
                left[l - 1]
            } else {
                r += 1;
                right[r - 1]
            };

            if self.op.allows(left_hit, in_left, in_right) {
                xs.push(i);
            }

            if left_hit {
                in_left = !in_left;
            } else {
                in_right = !in_right;
            }
        }
    }
}
