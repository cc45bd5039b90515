use std::ops::Mul;

use crate::{
    approx::ApproxEq, Float, Mat4, Matrix, Number, One, Quat, SquareMatrix, Vec3, Vector, Zero,
};

/// A linear map stored together with its inverse.
///
/// Keeping both matrices means the inverse never has to be recomputed: inverting a transform
/// swaps the pair, and composing two transforms multiplies both pairs. Every constructor
/// establishes `matrix * inverse ≈ I`, and there is no way to mutate a [`Transform`] afterwards.
///
/// `N` is the dimension of the matrices. For 3D work that needs translation, use `N = 4` with
/// homogeneous coordinates and [`Transform::transform_point`].
///
/// # Examples
///
/// ```
/// # use lumen_linalg::*;
/// let rotate = Transform::<f64, 3>::from_quat(Quat::from_rotation_z(0.5));
/// let scale = Transform::from_scale(vec3(2.0, 2.0, 2.0));
/// let both = rotate * scale;
///
/// let v = vec3(1.0, 2.0, 3.0);
/// assert_approx_eq!(both.inverse_transform_vector(both.transform_vector(v)), v).abs(1e-12);
/// assert_approx_eq!(both.matrix() * both.inverse_matrix(), Mat3::IDENTITY).abs(1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform<T, const N: usize> {
    matrix: Matrix<T, N, N>,
    inverse: Matrix<T, N, N>,
}

impl<T: Zero + One + Copy, const N: usize> Transform<T, N> {
    /// The identity transform. Both matrices are the identity matrix.
    pub const IDENTITY: Self = Self {
        matrix: Matrix::IDENTITY,
        inverse: Matrix::IDENTITY,
    };
}

impl<T, const N: usize> Transform<T, N> {
    /// Pairs `matrix` with a caller-provided `inverse`.
    ///
    /// The pairing is not verified. Passing a matrix that is not the inverse of `matrix` makes
    /// [`Transform::inverse_transform_vector`] and [`Transform::inverse`] return wrong results.
    #[inline]
    pub const fn from_matrix_pair(matrix: Matrix<T, N, N>, inverse: Matrix<T, N, N>) -> Self {
        Self { matrix, inverse }
    }

    /// Creates a transform from `matrix`, computing its inverse.
    ///
    /// Returns [`None`] if `matrix` is singular.
    pub fn from_matrix(matrix: Matrix<T, N, N>) -> Option<Self>
    where
        T: Float,
        Matrix<T, N, N>: SquareMatrix<T>,
    {
        let inverse = matrix.try_inverse()?;
        Some(Self { matrix, inverse })
    }

    /// Creates a transform that scales each axis by the matching element of `scale`.
    ///
    /// A zero scale factor yields an infinite inverse.
    pub fn from_scale(scale: Vector<T, N>) -> Self
    where
        T: Number,
    {
        Self {
            matrix: Matrix::from_diagonal(scale),
            inverse: Matrix::from_diagonal(scale.map(|s| T::ONE / s)),
        }
    }

    /// Returns the forward matrix.
    #[inline]
    pub fn matrix(&self) -> Matrix<T, N, N>
    where
        T: Copy,
    {
        self.matrix
    }

    /// Returns the inverse matrix.
    #[inline]
    pub fn inverse_matrix(&self) -> Matrix<T, N, N>
    where
        T: Copy,
    {
        self.inverse
    }

    /// Returns the inverse transform, by swapping the two matrices.
    #[inline]
    pub fn inverse(&self) -> Self
    where
        T: Copy,
    {
        Self {
            matrix: self.inverse,
            inverse: self.matrix,
        }
    }

    /// Applies the linear map to `vector`.
    #[doc(alias = "xform_vector")]
    #[inline]
    pub fn transform_vector(&self, vector: Vector<T, N>) -> Vector<T, N>
    where
        T: Number,
    {
        self.matrix * vector
    }

    /// Applies the inverse linear map to `vector`.
    #[inline]
    pub fn inverse_transform_vector(&self, vector: Vector<T, N>) -> Vector<T, N>
    where
        T: Number,
    {
        self.inverse * vector
    }
}

impl<T: Number> Transform<T, 3> {
    /// Creates a rotation from a unit quaternion.
    ///
    /// Rotation matrices are orthogonal, so the inverse is the transpose. A quaternion that is not
    /// unit length does not produce a rotation; debug builds panic on one.
    pub fn from_quat(quat: Quat<T>) -> Self
    where
        T: Float,
    {
        debug_assert_unit(&quat);
        let matrix = quat.to_matrix();
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }
}

impl<T: Number> Transform<T, 4> {
    /// Creates a homogeneous rotation from a unit quaternion.
    pub fn from_quat(quat: Quat<T>) -> Self
    where
        T: Float,
    {
        debug_assert_unit(&quat);
        let matrix = quat.to_homogeneous();
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }

    /// Creates a homogeneous translation by `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let t = Transform::from_translation(vec3(1.0, 2.0, 3.0));
    /// assert_eq!(t.transform_point(Vec3::ZERO), vec3(1.0, 2.0, 3.0));
    /// assert_eq!(t.inverse().transform_point(vec3(1.0, 2.0, 3.0)), Vec3::ZERO);
    /// ```
    pub fn from_translation(offset: Vec3<T>) -> Self {
        let mut matrix = Mat4::IDENTITY;
        let mut inverse = Mat4::IDENTITY;
        for i in 0..3 {
            matrix[(i, 3)] = offset[i];
            inverse[(i, 3)] = -offset[i];
        }
        Self { matrix, inverse }
    }

    /// Transforms a point given in 3D coordinates, including any translation.
    ///
    /// The point is extended with `w = 1`. If the transform is projective, the result is divided
    /// by the resulting `w`.
    pub fn transform_point(&self, point: Vec3<T>) -> Vec3<T> {
        Self::apply_to_point(&self.matrix, point)
    }

    /// Transforms a point with the inverse transform.
    pub fn inverse_transform_point(&self, point: Vec3<T>) -> Vec3<T> {
        Self::apply_to_point(&self.inverse, point)
    }

    fn apply_to_point(matrix: &Mat4<T>, point: Vec3<T>) -> Vec3<T> {
        let h = *matrix * point.extend(T::ONE);
        let w = h[3];
        if w == T::ONE {
            h.truncate()
        } else {
            h.truncate() / w
        }
    }
}

fn debug_assert_unit<T: Float>(quat: &Quat<T>) {
    debug_assert!(
        (quat.length2() - T::ONE).abs() <= T::EPSILON.sqrt(),
        "rotation quaternion is not unit length"
    );
}

impl<T: Zero + One + Copy, const N: usize> Default for Transform<T, N> {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Composition: `(a * b)` applies `b` first, then `a`.
impl<T: Number, const N: usize> Mul for Transform<T, N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            matrix: self.matrix * rhs.matrix,
            inverse: rhs.inverse * self.inverse,
        }
    }
}

impl<T: ApproxEq, const N: usize> ApproxEq for Transform<T, N> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.matrix.abs_diff_eq(&other.matrix, abs_tolerance)
            && self.inverse.abs_diff_eq(&other.inverse, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.matrix.rel_diff_eq(&other.matrix, rel_tolerance)
            && self.inverse.rel_diff_eq(&other.inverse, rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        self.matrix.ulps_diff_eq(&other.matrix, ulps_tolerance)
            && self.inverse.ulps_diff_eq(&other.inverse, ulps_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        approx::equal, assert_approx_eq, vec3, vec4, Mat3, Mat3f, Mat4f, Vec3d, Vec3f, Vec4f,
    };

    use super::*;

    fn random_vec3(rng: &mut fastrand::Rng) -> Vec3d {
        Vector::from_fn(|_| rng.f64() * 20.0 - 10.0)
    }

    #[test]
    fn identity() {
        let t = Transform::<f64, 3>::default();
        assert!(equal(&t.matrix(), &Mat3::IDENTITY, 1e-7));
        assert!(equal(&t.inverse_matrix(), &Mat3::IDENTITY, 1e-7));
        assert_eq!(Transform::<f32, 4>::IDENTITY.matrix(), Mat4f::IDENTITY);

        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            let v = random_vec3(&mut rng);
            assert!(equal(&t.transform_vector(v), &v, 1e-7));
        }
    }

    #[test]
    fn from_quat_uses_transpose() {
        let q = Quat::from_axis_angle(vec3(1.0, 2.0, 3.0), 0.9);
        let t = Transform::<f64, 3>::from_quat(q);
        assert_eq!(t.matrix(), q.to_matrix());
        assert_eq!(t.inverse_matrix(), q.to_matrix().transpose());
        assert!(equal(&t.inverse_matrix(), &q.to_matrix().inverse(), 1e-7));
        assert!(equal(&(t.matrix() * t.inverse_matrix()), &Mat3::IDENTITY, 1e-12));
    }

    #[test]
    fn from_quat_homogeneous() {
        let q = Quat::from_rotation_y(1.3f32);
        let t = Transform::<f32, 4>::from_quat(q);
        assert_eq!(t.matrix().truncate(), q.to_matrix());
        assert_eq!(t.matrix().row(3), Vec4f::W);
        let p = vec3(1.0, -2.0, 0.5);
        assert_approx_eq!(t.transform_point(p), q * p).abs(1e-5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "rotation quaternion is not unit length")]
    fn from_quat_rejects_scaled_quaternion() {
        let q = Quat::from_rotation_x(0.4f64) * Quat::from_components(0.0, 0.0, 0.0, 2.0);
        Transform::<f64, 4>::from_quat(q);
    }

    #[test]
    fn from_quat_accepts_rounding_drift() {
        let step = Quat::from_rotation_z(0.01f32);
        let mut q = Quat::IDENTITY;
        for _ in 0..1000 {
            q *= step;
        }
        let t = Transform::<f32, 3>::from_quat(q);
        assert_approx_eq!(t.matrix() * t.inverse_matrix(), Mat3f::IDENTITY).abs(1e-3);
    }

    #[test]
    fn from_matrix() {
        let singular = Mat3f::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]]);
        assert_eq!(Transform::from_matrix(singular), None);

        let m = Mat3f::from_rows([[2.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 1.0]]);
        let t = Transform::from_matrix(m).unwrap();
        assert_eq!(t.matrix(), m);
        assert_approx_eq!(m * t.inverse_matrix(), Mat3f::IDENTITY).abs(1e-6);
    }

    #[test]
    fn trusted_pair_is_not_checked() {
        let m = Mat3f::from_diagonal([2.0, 2.0, 2.0]);
        let t = Transform::from_matrix_pair(m, m);
        assert_eq!(t.inverse_transform_vector(Vec3f::X), vec3(2.0, 0.0, 0.0));
    }

    #[test]
    fn scale() {
        let t = Transform::from_scale(vec3(2.0f32, 4.0, 0.5));
        assert_eq!(t.transform_vector(vec3(1.0, 1.0, 1.0)), vec3(2.0, 4.0, 0.5));
        assert_eq!(t.inverse_transform_vector(vec3(2.0, 4.0, 0.5)), vec3(1.0, 1.0, 1.0));
        assert_eq!(t.inverse().inverse(), t);
    }

    #[test]
    fn composition_keeps_pairing() {
        let mut rng = fastrand::Rng::with_seed(0xc0ffee);
        for _ in 0..50 {
            let axis = random_vec3(&mut rng);
            let q = Quat::from_axis_angle(axis, rng.f64() * 6.0);
            let a = Transform::<f64, 4>::from_quat(q);
            let b = Transform::from_translation(random_vec3(&mut rng));
            let c = Transform::from_matrix(Mat4::from_mat3(Mat3::from_diagonal([1.5, 0.5, 3.0])))
                .unwrap();

            let composed = a * b * c;
            assert_approx_eq!(
                composed.matrix() * composed.inverse_matrix(),
                Mat4::IDENTITY
            )
            .abs(1e-12);

            let p = random_vec3(&mut rng);
            let expected = a.transform_point(b.transform_point(c.transform_point(p)));
            assert_approx_eq!(composed.transform_point(p), expected).abs(1e-12);
            assert_approx_eq!(composed.inverse_transform_point(composed.transform_point(p)), p)
                .abs(1e-12);
        }
    }

    #[test]
    fn inverse_swaps() {
        let t = Transform::from_translation(vec3(1.0f32, 0.0, 0.0));
        let inv = t.inverse();
        assert_eq!(inv.matrix(), t.inverse_matrix());
        assert_eq!(inv.inverse_matrix(), t.matrix());
        assert_eq!(t * inv, Transform::IDENTITY);
        assert_eq!(
            t.transform_vector(vec4(0.0, 0.0, 0.0, 1.0)),
            vec4(1.0, 0.0, 0.0, 1.0)
        );
    }
}
