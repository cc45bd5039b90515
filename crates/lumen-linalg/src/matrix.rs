use std::{array, fmt};

use crate::{Number, One, Vector, Zero};

mod ops;
mod square;

pub use square::SquareMatrix;

/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 3x3 matrix with [`f64`] elements.
pub type Mat3d = Mat3<f64>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;
/// A 4x4 matrix with [`f64`] elements.
pub type Mat4d = Mat4<f64>;

/// A matrix with 2 rows and 3 columns.
pub type Mat2x3<T> = Matrix<T, 2, 3>;
/// A matrix with 3 rows and 2 columns.
pub type Mat3x2<T> = Matrix<T, 3, 2>;

/// A column-major matrix with `R` rows and `C` columns, and element type `T`.
///
/// The matrix is stored as `C` column [`Vector`]s of length `R`. Both dimensions are part of the
/// type: multiplying matrices of incompatible shapes, or asking a non-square matrix for its
/// determinant, is a compile-time error.
///
/// # Construction
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] fill a matrix from arrays or vectors.
/// - [`Matrix::from_fn`] computes each element from its row and column.
/// - [`Matrix::from_diagonal`] creates a square diagonal matrix.
/// - [`Matrix::ZERO`] and [`Matrix::IDENTITY`].
///
/// # Element Access
///
/// `mat[(row, col)]` indexes elements, matching the usual mathematical notation. Indices are
/// 0-based and out-of-bounds indices panic. [`Matrix::get`] and [`Matrix::get_mut`] return
/// [`Option`]s instead. [`Matrix::column`] and [`Matrix::row`] return whole columns and rows.
///
/// ```
/// # use lumen_linalg::*;
/// let mat = Matrix::from_rows([
///     [1, 2, 3],
///     [4, 5, 6],
/// ]);
/// assert_eq!(mat[(1, 0)], 4);
/// assert_eq!(mat.column(2), vec2(3, 6));
/// assert_eq!(mat.row(0), vec3(1, 2, 3));
/// assert_eq!(mat.get(2, 0), None);
/// ```
///
/// # Square Matrices
///
/// Determinant and inverse of 1x1 to 4x4 matrices are provided by the [`SquareMatrix`] trait.
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>(pub(crate) [Vector<T, R>; C]);

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> {}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([Vector::ZERO; C]);
}

impl<T: Zero + One + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The identity matrix: 1 on the diagonal, 0 everywhere else.
    ///
    /// For non-square matrices, the diagonal ends at the smaller dimension.
    pub const IDENTITY: Self = {
        let mut this = Self::ZERO;
        let mut i = 0;
        while i < R && i < C {
            this.0[i].0[i] = T::ONE;
            i += 1;
        }
        this
    };
}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Creates a [`Matrix`] from an array of column vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let mat = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]));
    /// ```
    pub fn from_columns<U: Into<Vector<T, R>>>(columns: [U; C]) -> Self {
        Self(columns.map(Into::into))
    }

    /// Creates a [`Matrix`] from an array of row vectors.
    pub fn from_rows<U: Into<Vector<T, C>>>(rows: [U; R]) -> Self
    where
        T: Copy,
    {
        Matrix::<T, C, R>::from_columns(rows).transpose()
    }

    /// Creates a [`Matrix`] by invoking `cb` with the `(row, column)` of each element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let mat = Matrix::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|col| Vector::from_fn(|row| cb(row, col))))
    }

    /// Applies `f` to each element, returning a new matrix.
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|column| column.map(&mut f)))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.transpose(), Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(&self) -> Matrix<T, C, R>
    where
        T: Copy,
    {
        Matrix::from_fn(|row, col| self[(col, row)])
    }

    /// Returns the column at index `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= C`.
    #[inline]
    pub fn column(&self, col: usize) -> Vector<T, R>
    where
        T: Copy,
    {
        self.0[col]
    }

    /// Returns the row at index `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= R`.
    pub fn row(&self, row: usize) -> Vector<T, C>
    where
        T: Copy,
    {
        Vector::from_fn(|col| self.0[col][row])
    }

    /// Returns an iterator over the column vectors, from left to right.
    pub fn columns(&self) -> impl Iterator<Item = &Vector<T, R>> + '_ {
        self.0.iter()
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(col).and_then(|column| column.as_slice().get(row))
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0
            .get_mut(col)
            .and_then(|column| column.as_mut_slice().get_mut(row))
    }
}

impl<T, const N: usize> Matrix<T, N, N> {
    /// Creates a square matrix from its diagonal, with zero everywhere else.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// assert_eq!(Matrix::from_diagonal([1, 2]), Matrix::from_rows([
    ///     [1, 0],
    ///     [0, 2],
    /// ]));
    /// ```
    pub fn from_diagonal<D: Into<Vector<T, N>>>(diag: D) -> Self
    where
        T: Zero + Copy,
    {
        let diag = diag.into();
        Self::from_fn(|row, col| if row == col { diag[row] } else { T::ZERO })
    }

    /// Returns the diagonal elements of this matrix.
    pub fn into_diagonal(self) -> Vector<T, N>
    where
        T: Copy,
    {
        Vector::from_fn(|i| self[(i, i)])
    }

    /// Returns the sum of the diagonal elements.
    pub fn trace(&self) -> T
    where
        T: Number,
    {
        (0..N).fold(T::ZERO, |acc, i| acc + self[(i, i)])
    }
}

impl<T: Zero + One + Copy> Matrix<T, 4, 4> {
    /// Embeds a 3x3 linear map in the upper-left corner of a homogeneous 4x4 matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let m = Mat4f::from_mat3(Mat3f::IDENTITY * 2.0);
    /// assert_eq!(m * vec4(1.0, 1.0, 1.0, 1.0), vec4(2.0, 2.0, 2.0, 1.0));
    /// assert_eq!(m.truncate(), Mat3f::IDENTITY * 2.0);
    /// ```
    pub fn from_mat3(mat: Matrix<T, 3, 3>) -> Self {
        let mut this = Self::IDENTITY;
        for (dest, src) in this.0.iter_mut().zip(mat.0) {
            *dest = src.extend(T::ZERO);
        }
        this
    }

    /// Returns the upper-left 3x3 block (the linear part of a homogeneous transform).
    pub fn truncate(&self) -> Matrix<T, 3, 3> {
        Matrix::from_fn(|row, col| self[(row, col)])
    }
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Row<'a, T, const R: usize, const C: usize>(&'a Matrix<T, R, C>, usize);

        impl<'a, T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Row<'a, T, R, C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for col in 0..C {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", self.0[(self.1, col)])?;
                }
                write!(f, "]")
            }
        }

        // Rows in reading order, even though storage is column-major.
        f.debug_list()
            .entries((0..R).map(|row| Row(self, row)))
            .finish()
    }
}

impl<T: Default, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, vec2, vec3, Mat2x3, Mat3x2, Vec3f};

    use super::*;

    #[test]
    fn from_rows_columns() {
        assert_eq!(
            Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]),
            Mat2x3::from_columns([[1, 4], [2, 5], [3, 6]]),
        );
        assert_eq!(
            Mat3x2::from_columns([vec3(1, 2, 3), vec3(4, 5, 6)]).row(1),
            vec2(2, 5)
        );
    }

    #[test]
    fn constants() {
        assert_eq!(format!("{:?}", Mat2f::ZERO), "[[0.0, 0.0], [0.0, 0.0]]");
        assert_eq!(format!("{:?}", Mat2f::IDENTITY), "[[1.0, 0.0], [0.0, 1.0]]");
        assert_eq!(
            Mat2x3::<i32>::IDENTITY,
            Matrix::from_rows([[1, 0, 0], [0, 1, 0]])
        );
        assert_eq!(Mat4f::IDENTITY.trace(), 4.0);
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);
        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");
        assert_eq!(format!("{:#?}", mat), "[\n    [0, 1],\n    [2, 3],\n]");
    }

    #[test]
    fn diagonal() {
        let mat = Matrix::from_diagonal([1, 2, 3]);
        assert_eq!(mat.trace(), 6);
        assert_eq!(mat.into_diagonal(), [1, 2, 3]);
    }

    #[test]
    fn access() {
        let mut mat = Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]);
        if let Some(elem) = mat.get_mut(1, 2) {
            *elem = 60;
        }
        assert_eq!(mat.get_mut(2, 0), None);
        assert_eq!(mat[(1, 2)], 60);
        assert_eq!(mat.columns().count(), 3);
        assert_eq!(mat.columns().last(), Some(&vec2(3, 60)));
    }

    #[test]
    fn mat_vec_mul() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);
        assert_eq!(mat * vec2(4, 5), [5, 23]);
    }

    #[test]
    fn mat_mat_mul() {
        #[rustfmt::skip]
        let a = Matrix::from_rows([
            [1, 2],
            [3, 4],
            [5, 6],
            [7, 8],
        ]);
        #[rustfmt::skip]
        let b = Matrix::from_rows([
            [ 9, 10, 11],
            [12, 13, 14],
        ]);
        let c = a * b;
        assert_eq!(c[(0, 1)], 1 * 10 + 2 * 13);
        assert_eq!(c[(3, 2)], 7 * 11 + 8 * 14);
        assert_eq!((a * b).transpose(), b.transpose() * a.transpose());
    }

    #[test]
    fn add_sub_scale() {
        let a = Mat2f::IDENTITY;
        let b = Matrix::from_rows([[0.0, 1.0], [2.0, 3.0]]);
        assert_eq!(a + b - b, a);
        assert_eq!(-a * 3.0, Matrix::from_diagonal([-3.0, -3.0]));
    }

    #[test]
    fn approx_column_wise() {
        let a = Mat3f::IDENTITY;
        let b = Mat3f::IDENTITY + Matrix::from_fn(|_, _| 1e-8);
        assert_approx_eq!(a, b).abs(1e-7);
        assert!(crate::approx::equal(&a, &b, 1e-7));
        assert!(!crate::approx::equal(&a, &(a * 1.1), 1e-7));
    }

    #[test]
    fn homogeneous_embedding() {
        let m = Mat3f::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let h = Mat4f::from_mat3(m);
        assert_eq!(h.row(3), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(h.column(3), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(h.truncate(), m);

        let v: Vec3f = vec3(1.0, -1.0, 0.5);
        assert_eq!((h * v.extend(0.0)).truncate(), m * v);
    }
}
