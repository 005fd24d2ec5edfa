use std::ops::Mul;

use approx::AbsDiffEq;

use super::{Vector4, EPSILON};
use crate::error::{Error, Result};

/// A 4x4 row-major transformation matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    pub m: [[f64; 4]; 4],
}

impl Matrix {
    /// Create a new matrix from its rows.
    pub fn new(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    #[rustfmt::skip]
    pub fn identity() -> Self {
        Self::new([
            [1., 0., 0., 0.],
            [0., 1., 0., 0.],
            [0., 0., 1., 0.],
            [0., 0., 0., 1.],
        ])
    }

    /// Move points by the given offsets. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut o = Self::identity();
        o.m[0][3] = x;
        o.m[1][3] = y;
        o.m[2][3] = z;
        o
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        let mut o = Self::identity();
        o.m[0][0] = x;
        o.m[1][1] = y;
        o.m[2][2] = z;
        o
    }

    #[rustfmt::skip]
    pub fn rotation_x(r: f64) -> Self {
        Self::new([
            [1., 0., 0., 0.],
            [0., r.cos(), -r.sin(), 0.],
            [0., r.sin(), r.cos(), 0.],
            [0., 0., 0., 1.],
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_y(r: f64) -> Self {
        Self::new([
            [r.cos(), 0., r.sin(), 0.],
            [0., 1., 0., 0.],
            [-r.sin(), 0., r.cos(), 0.],
            [0., 0., 0., 1.],
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_z(r: f64) -> Self {
        Self::new([
            [r.cos(), -r.sin(), 0., 0.],
            [r.sin(), r.cos(), 0., 0.],
            [0., 0., 1., 0.],
            [0., 0., 0., 1.],
        ])
    }

    /// Shear each axis in proportion to the other two.
    #[rustfmt::skip]
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        Self::new([
            [1., xy, xz, 0.],
            [yx, 1., yz, 0.],
            [zx, zy, 1., 0.],
            [0., 0., 0., 1.],
        ])
    }

    /// Orient the world relative to an eye at `from` looking at `to`.
    #[rustfmt::skip]
    pub fn view_transform(from: Vector4, to: Vector4, up: Vector4) -> Self {
        let forward = (to - from).normalize();
        let left = forward.cross(up.normalize());
        let true_up = left.cross(forward);

        let orientation = Self::new([
            [left.x, left.y, left.z, 0.],
            [true_up.x, true_up.y, true_up.z, 0.],
            [-forward.x, -forward.y, -forward.z, 0.],
            [0., 0., 0., 1.],
        ]);

        orientation * Self::translation(-from.x, -from.y, -from.z)
    }

    pub fn transpose(&self) -> Self {
        let mut o = [[0.; 4]; 4];
        for (i, row) in self.m.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                o[j][i] = *v;
            }
        }
        Self::new(o)
    }

    fn minor3(&self, row: usize, col: usize) -> f64 {
        let mut sub = [[0.; 3]; 3];
        let mut si = 0;
        for i in (0..4).filter(|&i| i != row) {
            let mut sj = 0;
            for j in (0..4).filter(|&j| j != col) {
                sub[si][sj] = self.m[i][j];
                sj += 1;
            }
            si += 1;
        }

        sub[0][0] * (sub[1][1] * sub[2][2] - sub[1][2] * sub[2][1])
            - sub[0][1] * (sub[1][0] * sub[2][2] - sub[1][2] * sub[2][0])
            + sub[0][2] * (sub[1][0] * sub[2][1] - sub[1][1] * sub[2][0])
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let minor = self.minor3(row, col);
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    pub fn determinant(&self) -> f64 {
        (0..4).map(|j| self.m[0][j] * self.cofactor(0, j)).sum()
    }

    /// Invert this matrix. Singular matrices are rejected rather than producing
    /// a matrix full of infinities.
    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant();
        if det == 0. || !det.is_finite() {
            return Err(Error::SingularMatrix);
        }

        let mut o = [[0.; 4]; 4];
        for (i, row) in o.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                // transposed cofactor matrix
                *v = self.cofactor(j, i) / det;
            }
        }

        Ok(Self::new(o))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let a = self.m;
        let b = rhs.m;
        let mut o = [[0.; 4]; 4];

        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    o[i][j] += a[i][k] * b[k][j];
                }
            }
        }

        Self::new(o)
    }
}

impl Mul<Vector4> for Matrix {
    type Output = Vector4;

    fn mul(self, v: Vector4) -> Self::Output {
        let row = |r: [f64; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        Vector4::new(row(self.m[0]), row(self.m[1]), row(self.m[2]), row(self.m[3]))
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn inverse_undoes_multiplication() {
        let a = Matrix::new([
            [3., -9., 7., 3.],
            [3., -8., 2., -9.],
            [-4., 4., 4., 1.],
            [-6., 5., -1., 1.],
        ]);
        let b = Matrix::new([
            [8., 2., 2., 2.],
            [3., -1., 7., 0.],
            [7., 0., 5., 4.],
            [6., -2., 0., 5.],
        ]);
        let c = a * b;
        assert_abs_diff_eq!(c * b.inverse().unwrap(), a, epsilon = 1e-10);
        assert_abs_diff_eq!(a * a.inverse().unwrap(), Matrix::identity(), epsilon = 1e-10);
    }

    #[test]
    fn determinant_of_4x4() {
        let a = Matrix::new([
            [-2., -8., 3., 5.],
            [-3., 1., 7., 3.],
            [1., 2., -9., 6.],
            [-6., 7., 7., -9.],
        ]);
        assert_abs_diff_eq!(a.determinant(), -4071.);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let a = Matrix::new([
            [-4., 2., -2., -3.],
            [9., 6., 2., 6.],
            [0., -5., 1., -5.],
            [0., 0., 0., 0.],
        ]);
        assert!(matches!(a.inverse(), Err(Error::SingularMatrix)));
        assert!(Matrix::scaling(1., 0., 1.).inverse().is_err());
    }

    #[test]
    fn translation_moves_points_not_vectors() {
        let t = Matrix::translation(5., -3., 2.);
        assert_eq!(t * Vector4::point(-3., 4., 5.), Vector4::point(2., 1., 7.));
        let v = Vector4::vector(-3., 4., 5.);
        assert_eq!(t * v, v);
    }

    #[test]
    fn chained_transforms_apply_in_reverse_order() {
        let p = Vector4::point(1., 0., 1.);
        let t = Matrix::translation(10., 5., 7.)
            * Matrix::scaling(5., 5., 5.)
            * Matrix::rotation_x(PI / 2.);
        assert_abs_diff_eq!(t * p, Vector4::point(15., 0., 7.));
    }

    #[test]
    fn view_transform_looking_down_positive_z_mirrors() {
        let t = Matrix::view_transform(
            Vector4::origin(),
            Vector4::point(0., 0., 1.),
            Vector4::up(),
        );
        assert_abs_diff_eq!(t, Matrix::scaling(-1., 1., -1.));
    }

    #[test]
    fn view_transform_moves_the_world() {
        let t = Matrix::view_transform(
            Vector4::point(0., 0., 8.),
            Vector4::origin(),
            Vector4::up(),
        );
        assert_abs_diff_eq!(t, Matrix::translation(0., 0., -8.));
    }
}
