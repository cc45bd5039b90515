//! Determinants and inverses of small square matrices.

use std::ops::Mul;

use crate::{
    num::{difference_of_products, inner_product},
    Float,
};

use super::Matrix;

/// Determinant and inverse of square matrices with a fixed, small size (1x1 up to 4x4).
///
/// The implementations use closed-form cofactor expansions built from the compensated kernels
/// in [`crate::num`], so they don't branch and stay accurate when the 2x2 minors nearly cancel.
///
/// Non-square matrices don't implement this trait, so asking for their determinant does not
/// compile.
pub trait SquareMatrix<T: Float>: Copy + Mul<T, Output = Self> {
    /// Computes the determinant of this matrix.
    fn determinant(&self) -> T;

    /// Computes the adjugate (the transpose of the cofactor matrix).
    ///
    /// For any matrix `m`, `m * m.adjugate() == I * m.determinant()`.
    fn adjugate(&self) -> Self;

    /// Computes the inverse of this matrix.
    ///
    /// If the matrix is singular, the division by a zero determinant makes the result consist of
    /// infinities and `NaN`s. Use [`SquareMatrix::try_inverse`] to detect that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let m = Matrix::from_rows([
    ///     [2.0, 0.0],
    ///     [0.0, 4.0],
    /// ]);
    /// assert_eq!(m.inverse(), Matrix::from_diagonal([0.5, 0.25]));
    /// ```
    fn inverse(&self) -> Self {
        self.adjugate() * (T::ONE / self.determinant())
    }

    /// Computes the inverse of this matrix, or returns [`None`] if its determinant is zero.
    fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == T::ZERO {
            return None;
        }
        Some(self.adjugate() * (T::ONE / det))
    }
}

impl<T: Float> SquareMatrix<T> for Matrix<T, 1, 1> {
    fn determinant(&self) -> T {
        self[(0, 0)]
    }

    fn adjugate(&self) -> Self {
        Matrix::IDENTITY
    }
}

impl<T: Float> SquareMatrix<T> for Matrix<T, 2, 2> {
    fn determinant(&self) -> T {
        let m = |row: usize, col: usize| self[(row, col)];
        difference_of_products(m(0, 0), m(1, 1), m(0, 1), m(1, 0))
    }

    fn adjugate(&self) -> Self {
        let m = |row: usize, col: usize| self[(row, col)];
        #[rustfmt::skip]
        let adj = Matrix::from_rows([
            [m(1, 1), -m(0, 1)],
            [-m(1, 0), m(0, 0)],
        ]);
        adj
    }
}

impl<T: Float> SquareMatrix<T> for Matrix<T, 3, 3> {
    fn determinant(&self) -> T {
        let m = |row: usize, col: usize| self[(row, col)];
        let minor12 = difference_of_products(m(1, 1), m(2, 2), m(1, 2), m(2, 1));
        let minor02 = difference_of_products(m(1, 0), m(2, 2), m(1, 2), m(2, 0));
        let minor01 = difference_of_products(m(1, 0), m(2, 1), m(1, 1), m(2, 0));
        m(0, 2).mul_add(
            minor01,
            difference_of_products(m(0, 0), minor12, m(0, 1), minor02),
        )
    }

    fn adjugate(&self) -> Self {
        let m = |row: usize, col: usize| self[(row, col)];
        // Each entry is the cofactor of the transposed position, with the sign folded into the
        // operand order.
        let cof = |a: (usize, usize), b: (usize, usize), c: (usize, usize), d: (usize, usize)| {
            difference_of_products(m(a.0, a.1), m(b.0, b.1), m(c.0, c.1), m(d.0, d.1))
        };

        Matrix::from_rows([
            [
                cof((1, 1), (2, 2), (1, 2), (2, 1)),
                cof((0, 2), (2, 1), (0, 1), (2, 2)),
                cof((0, 1), (1, 2), (0, 2), (1, 1)),
            ],
            [
                cof((1, 2), (2, 0), (1, 0), (2, 2)),
                cof((0, 0), (2, 2), (0, 2), (2, 0)),
                cof((0, 2), (1, 0), (0, 0), (1, 2)),
            ],
            [
                cof((1, 0), (2, 1), (1, 1), (2, 0)),
                cof((0, 1), (2, 0), (0, 0), (2, 1)),
                cof((0, 0), (1, 1), (0, 1), (1, 0)),
            ],
        ])
    }
}

/// The 2x2 minors of a 4x4 matrix that the Laplace expansion along the first two rows needs.
///
/// `s` are taken from rows 0 and 1, `c` from rows 2 and 3. Both are indexed by the column pairs
/// `(0,1) (0,2) (0,3) (1,2) (1,3) (2,3)`.
struct Minors4<T> {
    s: [T; 6],
    c: [T; 6],
}

impl<T: Float> Minors4<T> {
    fn new(mat: &Matrix<T, 4, 4>) -> Self {
        const PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let m = |row: usize, col: usize| mat[(row, col)];
        let s = PAIRS.map(|(i, j)| difference_of_products(m(0, i), m(1, j), m(1, i), m(0, j)));
        let c = PAIRS.map(|(i, j)| difference_of_products(m(2, i), m(3, j), m(3, i), m(2, j)));
        Self { s, c }
    }
}

impl<T: Float> SquareMatrix<T> for Matrix<T, 4, 4> {
    fn determinant(&self) -> T {
        let Minors4 { s, c } = Minors4::new(self);
        inner_product(&[
            (s[0], c[5]),
            (-s[1], c[4]),
            (s[2], c[3]),
            (s[3], c[2]),
            (s[5], c[0]),
            (-s[4], c[1]),
        ])
    }

    fn adjugate(&self) -> Self {
        let Minors4 { s, c } = Minors4::new(self);
        let m = |row: usize, col: usize| self[(row, col)];
        let ip = |terms: [(T, T); 3]| inner_product(&terms);

        Matrix::from_rows([
            [
                ip([(m(1, 1), c[5]), (m(1, 3), c[3]), (-m(1, 2), c[4])]),
                ip([(-m(0, 1), c[5]), (m(0, 2), c[4]), (-m(0, 3), c[3])]),
                ip([(m(3, 1), s[5]), (m(3, 3), s[3]), (-m(3, 2), s[4])]),
                ip([(-m(2, 1), s[5]), (m(2, 2), s[4]), (-m(2, 3), s[3])]),
            ],
            [
                ip([(-m(1, 0), c[5]), (m(1, 2), c[2]), (-m(1, 3), c[1])]),
                ip([(m(0, 0), c[5]), (m(0, 3), c[1]), (-m(0, 2), c[2])]),
                ip([(-m(3, 0), s[5]), (m(3, 2), s[2]), (-m(3, 3), s[1])]),
                ip([(m(2, 0), s[5]), (m(2, 3), s[1]), (-m(2, 2), s[2])]),
            ],
            [
                ip([(m(1, 0), c[4]), (m(1, 3), c[0]), (-m(1, 1), c[2])]),
                ip([(-m(0, 0), c[4]), (m(0, 1), c[2]), (-m(0, 3), c[0])]),
                ip([(m(3, 0), s[4]), (m(3, 3), s[0]), (-m(3, 1), s[2])]),
                ip([(-m(2, 0), s[4]), (m(2, 1), s[2]), (-m(2, 3), s[0])]),
            ],
            [
                ip([(-m(1, 0), c[3]), (m(1, 1), c[1]), (-m(1, 2), c[0])]),
                ip([(m(0, 0), c[3]), (m(0, 2), c[0]), (-m(0, 1), c[1])]),
                ip([(-m(3, 0), s[3]), (m(3, 1), s[1]), (-m(3, 2), s[0])]),
                ip([(m(2, 0), s[3]), (m(2, 2), s[0]), (-m(2, 1), s[1])]),
            ],
        ])
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, Mat2f, Mat3d, Mat3f, Mat4d, Mat4f, Matrix};

    use super::*;

    #[test]
    fn determinant_1x1_2x2() {
        assert_eq!(Matrix::from_rows([[3.0f32]]).determinant(), 3.0);
        assert_eq!(Matrix::from_rows([[3.0f32]]).inverse(), Matrix::from_rows([[1.0 / 3.0]]));

        let m = Mat2f::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.determinant(), -2.0);
        assert_eq!(
            m.inverse(),
            Mat2f::from_rows([[-2.0, 1.0], [1.5, -0.5]])
        );
    }

    #[test]
    fn determinant_3x3() {
        #[rustfmt::skip]
        let m = Mat3f::from_rows([
            [2.0, -3.0, 1.0],
            [2.0,  0.0, -1.0],
            [1.0,  4.0, 5.0],
        ]);
        // 2*(0+4) + 3*(10+1) + 1*(8-0)
        assert_eq!(m.determinant(), 49.0);
        assert_eq!(Mat3f::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat3f::from_diagonal([2.0, 3.0, 4.0]).determinant(), 24.0);
    }

    #[test]
    fn determinant_4x4() {
        #[rustfmt::skip]
        let m = Mat4d::from_rows([
            [1.0, 0.0, 2.0, -1.0],
            [3.0, 0.0, 0.0,  5.0],
            [2.0, 1.0, 4.0, -3.0],
            [1.0, 0.0, 5.0,  0.0],
        ]);
        assert_eq!(m.determinant(), 30.0);
        assert_eq!(Mat4f::IDENTITY.determinant(), 1.0);
        // Swapping two rows flips the sign.
        let swapped = Mat4d::from_rows([m.row(1), m.row(0), m.row(2), m.row(3)]);
        assert_eq!(swapped.determinant(), -30.0);
    }

    #[test]
    fn inverse_3x3() {
        #[rustfmt::skip]
        let m = Mat3d::from_rows([
            [2.0, -3.0, 1.0],
            [2.0,  0.0, -1.0],
            [1.0,  4.0, 5.0],
        ]);
        let inv = m.inverse();
        assert_approx_eq!(m * inv, Mat3d::IDENTITY).abs(1e-12);
        assert_approx_eq!(inv * m, Mat3d::IDENTITY).abs(1e-12);
        assert_approx_eq!(m * m.adjugate(), Mat3d::IDENTITY * 49.0).abs(1e-12);
    }

    #[test]
    fn inverse_4x4() {
        #[rustfmt::skip]
        let m = Mat4d::from_rows([
            [1.0, 0.0, 2.0, -1.0],
            [3.0, 0.0, 0.0,  5.0],
            [2.0, 1.0, 4.0, -3.0],
            [1.0, 0.0, 5.0,  0.0],
        ]);
        let inv = m.inverse();
        assert_approx_eq!(m * inv, Mat4d::IDENTITY).abs(1e-12);
        assert_approx_eq!(inv.inverse(), m).abs(1e-12);
        assert_approx_eq!(inv.determinant(), 1.0 / 30.0).abs(1e-15);
    }

    #[test]
    fn singular() {
        let m = Mat3f::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.try_inverse(), None);
        assert!(m.inverse().columns().any(|c| c.as_slice().iter().any(|e| !e.is_finite())));

        assert_eq!(Mat4f::ZERO.try_inverse(), None);
        assert_eq!(Mat2f::IDENTITY.try_inverse(), Some(Mat2f::IDENTITY));
    }

    #[test]
    fn near_singular_2x2() {
        // The naive `a*d - b*c` evaluates to exactly 0 in `f32`.
        let a = 1.0f32 + f32::EPSILON;
        let m = Mat2f::from_rows([[a, 1.0], [1.0, 1.0 - f32::EPSILON]]);
        let exact = (a as f64) * (1.0 - f32::EPSILON as f64) - 1.0;
        assert_eq!(a * (1.0 - f32::EPSILON) - 1.0, 0.0);
        assert_approx_eq!(m.determinant(), exact as f32).ulps(2);
    }
}
