use std::fmt;

use crate::{vec3, vec4, Float, Mat3, Mat4, Matrix, Number, One, Sqrt, Vec3, Vector, Zero};

mod ops;

/// A quaternion consisting of 3 imaginary numbers and a real number.
///
/// Unit-length quaternions ("*versors*") are commonly used to represent rotations in 3D space.
///
/// The components are named `x`, `y`, `z` (the imaginary `i`, `j` and `k` parts) and `w` (the real
/// part), and can be accessed as fields: `q.w`.
///
/// # Composition
///
/// `a * b` is the Hamilton product. As a rotation it applies `b` first and `a` second, the same
/// order as the matrix product `a.to_matrix() * b.to_matrix()`:
///
/// ```
/// # use lumen_linalg::*;
/// let a = Quat::from_rotation_x(0.3f64);
/// let b = Quat::from_rotation_y(1.2);
/// assert_approx_eq!((a * b).to_matrix(), a.to_matrix() * b.to_matrix()).abs(1e-12);
/// ```
#[derive(Clone, Copy, Hash)]
pub struct Quat<T> {
    vec: Vector<T, 4>,
}

/// A quaternion with [`f32`] components.
pub type Quatf = Quat<f32>;

impl<T: Zero + One> Quat<T> {
    /// The multiplicative identity.
    ///
    /// As a rotation, this quaternion leaves every vector unchanged.
    pub const IDENTITY: Self = Self {
        vec: vec4(T::ZERO, T::ZERO, T::ZERO, T::ONE),
    };
}

impl<T> Quat<T> {
    /// Creates a quaternion from a 4-dimensional [`Vector`].
    ///
    /// The `x`, `y`, and `z` coordinates correspond to the `i`, `j`, and `k` imaginary parts, while
    /// the `w` component corresponds to the real number part of the quaternion.
    #[inline]
    pub const fn from_vec(vec: Vector<T, 4>) -> Self {
        Self { vec }
    }

    #[inline]
    pub const fn from_components(x: T, y: T, z: T, w: T) -> Self {
        Self {
            vec: vec4(x, y, z, w),
        }
    }

    /// Returns the components as a [`Vector`] in `x, y, z, w` order.
    #[inline]
    pub fn into_vec(self) -> Vector<T, 4> {
        self.vec
    }

    /// Creates a quaternion that rotates by `radians` around `axis`.
    ///
    /// `axis` does not need to be normalized. Positive angles rotate counter-clockwise when looking
    /// along `axis` towards the origin. A zero `axis` has no direction: the `x`, `y` and `z`
    /// components of the result are NaN, like [`Vector::normalize`] of a zero vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let quarter = Quat::from_axis_angle(vec3(0.0, 0.0, 2.0), std::f64::consts::FRAC_PI_2);
    /// assert_approx_eq!(quarter * Vec3::X, Vec3::Y).abs(1e-15);
    /// ```
    pub fn from_axis_angle(axis: Vec3<T>, radians: T) -> Self
    where
        T: Float,
    {
        let (sin, cos) = (radians * T::HALF).sin_cos();
        let axis = axis.normalize() * sin;
        Self::from_components(axis.x, axis.y, axis.z, cos)
    }

    pub fn from_rotation_x(radians: T) -> Self
    where
        T: Float,
    {
        let (sin, cos) = (radians * T::HALF).sin_cos();
        Self::from_components(sin, T::ZERO, T::ZERO, cos)
    }

    pub fn from_rotation_y(radians: T) -> Self
    where
        T: Float,
    {
        let (sin, cos) = (radians * T::HALF).sin_cos();
        Self::from_components(T::ZERO, sin, T::ZERO, cos)
    }

    pub fn from_rotation_z(radians: T) -> Self
    where
        T: Float,
    {
        let (sin, cos) = (radians * T::HALF).sin_cos();
        Self::from_components(T::ZERO, T::ZERO, sin, cos)
    }

    /// Creates a quaternion representing a rotation around the X, Y, and Z axis, in sequence.
    ///
    /// The resulting rotation is `Rx * Ry * Rz`, so when applied to a vector, the Z rotation
    /// happens first.
    #[doc(alias = "euler")]
    pub fn from_rotation_xyz(x: T, y: T, z: T) -> Self
    where
        T: Float,
    {
        Self::from_rotation_x(x) * Self::from_rotation_y(y) * Self::from_rotation_z(z)
    }

    /// Converts a 3x3 rotation matrix to the quaternion representing the same rotation.
    ///
    /// `mat` should be orthogonal with determinant 1. The conversion branches on the largest of the
    /// trace and the diagonal elements, so the square root is always taken of a value no smaller
    /// than 1 (Shepperd's method).
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let q = Quat::from_rotation_xyz(0.1, -2.0, 3.0);
    /// let back = Quat::from_rotation_matrix(&q.to_matrix());
    /// assert_approx_eq!(back.to_matrix(), q.to_matrix()).abs(1e-12);
    /// ```
    pub fn from_rotation_matrix(mat: &Mat3<T>) -> Self
    where
        T: Float,
    {
        let m = |row: usize, col: usize| mat[(row, col)];
        let quarter = T::HALF * T::HALF;
        let trace = mat.trace();

        if trace > T::ZERO {
            let s = (trace + T::ONE).sqrt() * T::TWO;
            Self::from_components(
                (m(2, 1) - m(1, 2)) / s,
                (m(0, 2) - m(2, 0)) / s,
                (m(1, 0) - m(0, 1)) / s,
                s * quarter,
            )
        } else if m(0, 0) > m(1, 1) && m(0, 0) > m(2, 2) {
            let s = (T::ONE + m(0, 0) - m(1, 1) - m(2, 2)).sqrt() * T::TWO;
            Self::from_components(
                s * quarter,
                (m(0, 1) + m(1, 0)) / s,
                (m(0, 2) + m(2, 0)) / s,
                (m(2, 1) - m(1, 2)) / s,
            )
        } else if m(1, 1) > m(2, 2) {
            let s = (T::ONE + m(1, 1) - m(0, 0) - m(2, 2)).sqrt() * T::TWO;
            Self::from_components(
                (m(0, 1) + m(1, 0)) / s,
                s * quarter,
                (m(1, 2) + m(2, 1)) / s,
                (m(0, 2) - m(2, 0)) / s,
            )
        } else {
            let s = (T::ONE + m(2, 2) - m(0, 0) - m(1, 1)).sqrt() * T::TWO;
            Self::from_components(
                (m(0, 2) + m(2, 0)) / s,
                (m(1, 2) + m(2, 1)) / s,
                s * quarter,
                (m(1, 0) - m(0, 1)) / s,
            )
        }
    }

    /// Converts this quaternion to a 3x3 rotation matrix.
    ///
    /// Assumes that `self` is a unit quaternion. The matrix of a non-unit quaternion is not a pure
    /// rotation.
    #[doc(alias = "mat3_cast")]
    pub fn to_matrix(&self) -> Mat3<T>
    where
        T: Number,
    {
        let [x, y, z, w] = self.vec.into_array();
        let two = T::ONE + T::ONE;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Matrix::from_rows([
            [T::ONE - two * (yy + zz), two * (xy - wz), two * (xz + wy)],
            [two * (xy + wz), T::ONE - two * (xx + zz), two * (yz - wx)],
            [two * (xz - wy), two * (yz + wx), T::ONE - two * (xx + yy)],
        ])
    }

    /// Converts this quaternion to a 4x4 homogeneous rotation matrix.
    pub fn to_homogeneous(&self) -> Mat4<T>
    where
        T: Number,
    {
        Mat4::from_mat3(self.to_matrix())
    }

    /// Returns the conjugate of this quaternion, which negates the imaginary parts.
    ///
    /// For unit quaternions, this is also the inverse.
    pub fn conjugate(self) -> Self
    where
        T: Number,
    {
        let [x, y, z, w] = self.vec.into_array();
        Self::from_components(-x, -y, -z, w)
    }

    /// Returns the multiplicative inverse of this quaternion.
    ///
    /// Works for quaternions of any non-zero length: the conjugate is divided by the squared
    /// length. The inverse of the zero quaternion has `NaN` components.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lumen_linalg::*;
    /// let q = Quat::from_components(0.0, 2.0, 0.0, 2.0);
    /// assert_eq!(q * q.inverse(), Quat::IDENTITY);
    /// ```
    pub fn inverse(self) -> Self
    where
        T: Number,
    {
        let length2 = self.length2();
        Self {
            vec: self.conjugate().vec / length2,
        }
    }

    /// Returns the dot product of the components of `self` and `other`.
    pub fn dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.vec.dot(other.vec)
    }

    /// Returns the squared length of this quaternion.
    ///
    /// If the squared length is not equal to one, multiplying a vector with this quaternion will
    /// scale the vector in addition to rotating it. When using quaternions to model rotations, it
    /// is advisable to ensure that quaternions are always of length one.
    pub fn length2(&self) -> T
    where
        T: Number,
    {
        self.vec.length2()
    }

    /// Returns the length of this quaternion.
    #[doc(alias = "norm", alias = "magnitude")]
    pub fn length(&self) -> T
    where
        T: Number + Sqrt,
    {
        self.vec.length()
    }

    /// Returns a normalized copy of this quaternion (whose length equals one).
    pub fn normalize(self) -> Self
    where
        T: Number + Sqrt,
    {
        Self {
            vec: self.vec.normalize(),
        }
    }

    /// Returns the imaginary part as a 3D vector.
    fn imaginary(&self) -> Vec3<T>
    where
        T: Copy,
    {
        vec3(self.vec[0], self.vec[1], self.vec[2])
    }
}

impl<T: Zero + One> Default for Quat<T> {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: fmt::Debug> fmt::Debug for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quat")
            .field("x", &self.vec[0])
            .field("y", &self.vec[1])
            .field("z", &self.vec[2])
            .field("w", &self.vec[3])
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{assert_approx_eq, assert_approx_ne, Mat3d, Vec3d};

    use super::*;

    #[test]
    fn identity() {
        let q = Quat::<f32>::default();
        assert_eq!(q, Quat::IDENTITY);
        assert_eq!(q.w, 1.0);
        assert_eq!(q.to_matrix(), Mat3::IDENTITY);
        assert_eq!(q.to_homogeneous(), Mat4::IDENTITY);
        assert_eq!(q * vec3(1.0, 2.0, 3.0), vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn zero_axis_is_nan() {
        let q = Quat::from_axis_angle(Vec3d::ZERO, 1.0);
        assert!(q.x.is_nan() && q.y.is_nan() && q.z.is_nan());
        assert_eq!(q.w, 0.5f64.cos());
    }

    #[test]
    fn fmt() {
        assert_eq!(
            format!("{:?}", Quat::from_components(1, 2, 3, 4)),
            "Quat { x: 1, y: 2, z: 3, w: 4 }"
        );
    }

    #[test]
    fn axis_rotations() {
        assert_approx_eq!(Quat::from_rotation_x(FRAC_PI_2) * Vec3d::Y, Vec3d::Z).abs(1e-15);
        assert_approx_eq!(Quat::from_rotation_y(FRAC_PI_2) * Vec3d::Z, Vec3d::X).abs(1e-15);
        assert_approx_eq!(Quat::from_rotation_z(FRAC_PI_2) * Vec3d::X, Vec3d::Y).abs(1e-15);

        assert_approx_eq!(
            Quat::from_rotation_y(0.7),
            Quat::from_axis_angle(Vec3d::Y, 0.7)
        )
        .abs(1e-15);
    }

    #[test]
    fn to_matrix_rotation_z() {
        let (s, c) = 0.4f64.sin_cos();
        let expected = Mat3d::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]);
        assert_approx_eq!(Quat::from_rotation_z(0.4).to_matrix(), expected).abs(1e-15);
    }

    #[test]
    fn xyz_order() {
        let q = Quat::from_rotation_xyz(0.3, 0.5, 0.7);
        let v = vec3(1.0, 2.0, 3.0);
        let expected = Quat::from_rotation_x(0.3) * (Quat::from_rotation_y(0.5) * (Quat::from_rotation_z(0.7) * v));
        assert_approx_eq!(q * v, expected).abs(1e-14);
    }

    #[test]
    fn hamilton_product() {
        // i * j = k, j * i = -k
        let i = Quat::from_components(1.0, 0.0, 0.0, 0.0);
        let j = Quat::from_components(0.0, 1.0, 0.0, 0.0);
        let k = Quat::from_components(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, -Quat::IDENTITY);
    }

    #[test]
    fn composition_matches_matrices() {
        let a = Quat::from_axis_angle(vec3(1.0, -2.0, 0.5), 1.1);
        let b = Quat::from_axis_angle(vec3(0.0, 3.0, 1.0), -2.4);
        assert_approx_eq!((a * b).to_matrix(), a.to_matrix() * b.to_matrix()).abs(1e-14);
        assert_approx_eq!((b * a).to_matrix(), b.to_matrix() * a.to_matrix()).abs(1e-14);

        let v = vec3(0.25, -4.0, 2.0);
        assert_approx_eq!((a * b) * v, a * (b * v)).abs(1e-14);
        assert_approx_eq!(a * v, a.to_matrix() * v).abs(1e-14);
    }

    #[test]
    fn matrix_round_trip_all_branches() {
        let quats = [
            Quat::from_axis_angle(vec3(1.0, 1.0, 1.0), 0.5),
            // Half-turns have a trace of -1, exercising the diagonal branches.
            Quat::from_rotation_x(PI),
            Quat::from_rotation_y(PI),
            Quat::from_rotation_z(PI),
            Quat::from_axis_angle(vec3(0.1, 0.2, 1.0), 3.0),
            Quat::from_axis_angle(vec3(1.0, 0.2, 0.1), 3.0),
            Quat::from_axis_angle(vec3(0.2, 1.0, 0.1), 3.0),
        ];
        for q in quats {
            let m = q.to_matrix();
            let back = Quat::from_rotation_matrix(&m);
            assert_approx_eq!(back.length(), 1.0).abs(1e-12);
            assert_approx_eq!(back.to_matrix(), m).abs(1e-12);
            // `q` and `-q` are the same rotation.
            assert_approx_eq!(back.dot(q).abs(), 1.0).abs(1e-12);
        }
    }

    #[test]
    fn conjugate_inverse() {
        let q = Quat::from_axis_angle(vec3(2.0, 0.0, 1.0), 0.8);
        assert_approx_eq!(q * q.conjugate(), Quat::IDENTITY).abs(1e-15);
        assert_approx_eq!(q.inverse(), q.conjugate()).abs(1e-15);
        assert_approx_eq!(q.to_matrix().transpose(), q.conjugate().to_matrix()).abs(1e-15);

        // Non-unit quaternions need the full inverse.
        let scaled = Quat::from_vec(q.into_vec() * 3.0);
        assert_approx_eq!(scaled * scaled.inverse(), Quat::IDENTITY).abs(1e-15);
        assert_approx_ne!(scaled * scaled.conjugate(), Quat::IDENTITY);
    }

    #[test]
    fn normalize() {
        let q = Quat::from_components(0.0, 3.0, 0.0, 4.0).normalize();
        assert_eq!(q, Quat::from_components(0.0, 0.6, 0.0, 0.8));
        assert!(Quat::<f32>::from_components(0.0, 0.0, 0.0, 0.0)
            .inverse()
            .into_vec()
            .as_slice()
            .iter()
            .all(|c| c.is_nan()));
    }
}
