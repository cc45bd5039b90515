//! Numeric traits the vector, matrix and kernel code is generic over.

use std::ops;

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types that support the trigonometric functions (angles are in radians).
pub trait Trig: Sized {
    fn acos(self) -> Self;

    /// Computes sine and cosine at once.
    fn sin_cos(self) -> (Self, Self);
}

/// Types that support a `min` and `max` operation.
///
/// Floats use [`f32::min`]/[`f32::max`], so a `NaN` operand yields the other operand. Integers
/// use [`Ord::min`] and [`Ord::max`].
pub trait MinMax: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
}

/// A trait for numeric types that support basic arithmetic operations.
pub trait Number:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + Copy
{
}

/// IEEE-754 binary floating-point types.
///
/// This is what the compensated kernels in [`crate::num`] and the determinant/inverse code are
/// written against: they need a correctly rounded fused multiply-add to recover the rounding
/// error of a product.
pub trait Float: Number + Sqrt + Trig + MinMax + PartialOrd {
    const HALF: Self;
    const TWO: Self;
    const FOUR: Self;
    /// The difference between `1.0` and the next larger representable number.
    const EPSILON: Self;

    /// Computes `self * a + b` with a single rounding.
    fn mul_add(self, a: Self, b: Self) -> Self;
    fn abs(self) -> Self;
    /// Returns `self` with the sign bit of `sign`.
    fn copysign(self, sign: Self) -> Self;
    fn is_nan(self) -> bool;
    fn is_finite(self) -> bool;
}

macro_rules! int_impls {
    ($($t:ty),+) => {
        $(
            impl Zero for $t {
                const ZERO: Self = 0;
            }

            impl One for $t {
                const ONE: Self = 1;
            }

            impl MinMax for $t {
                fn min(self, other: Self) -> Self {
                    Ord::min(self, other)
                }

                fn max(self, other: Self) -> Self {
                    Ord::max(self, other)
                }
            }
        )+
    };
}
int_impls!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! float_impls {
    ($($t:ty),+) => {
        $(
            impl Zero for $t {
                const ZERO: Self = 0.0;
            }

            impl One for $t {
                const ONE: Self = 1.0;
            }

            impl MinMax for $t {
                #[inline]
                fn min(self, other: Self) -> Self {
                    <$t>::min(self, other)
                }

                #[inline]
                fn max(self, other: Self) -> Self {
                    <$t>::max(self, other)
                }
            }

            impl Sqrt for $t {
                #[inline]
                fn sqrt(self) -> Self {
                    <$t>::sqrt(self)
                }
            }

            impl Trig for $t {
                #[inline]
                fn acos(self) -> Self {
                    <$t>::acos(self)
                }

                #[inline]
                fn sin_cos(self) -> (Self, Self) {
                    <$t>::sin_cos(self)
                }
            }

            impl Float for $t {
                const HALF: Self = 0.5;
                const TWO: Self = 2.0;
                const FOUR: Self = 4.0;
                const EPSILON: Self = <$t>::EPSILON;

                #[inline]
                fn mul_add(self, a: Self, b: Self) -> Self {
                    <$t>::mul_add(self, a, b)
                }

                #[inline]
                fn abs(self) -> Self {
                    <$t>::abs(self)
                }

                #[inline]
                fn copysign(self, sign: Self) -> Self {
                    <$t>::copysign(self, sign)
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$t>::is_nan(self)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    <$t>::is_finite(self)
                }
            }
        )+
    };
}
float_impls!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn generic_fma<T: Float>(a: T, b: T, c: T) -> T {
        a.mul_add(b, c)
    }

    #[test]
    fn fma_is_fused() {
        // 1 + 2^-27 squared needs more than 53 bits; the fused form keeps the low term.
        let x = 1.0 + 2.0f64.powi(-27);
        let naive = x * x - 1.0;
        let fused = generic_fma(x, x, -1.0);
        assert_ne!(naive, fused);
        assert_eq!(fused, 2.0f64.powi(-26) + 2.0f64.powi(-54));
    }

    fn half_angle<T: Float>(radians: T) -> (T, T) {
        (radians * T::HALF).sin_cos()
    }

    #[test]
    fn trig() {
        assert_eq!(half_angle(0.0f32), (0.0, 1.0));
        let (sin, cos) = half_angle(std::f64::consts::PI);
        assert_eq!(sin, 1.0);
        assert!(cos.abs() < 1e-16);
        assert_eq!(Trig::acos(-1.0f64), std::f64::consts::PI);
    }

    #[test]
    fn copysign() {
        assert_eq!(Float::copysign(3.0f32, -0.0), -3.0);
        assert_eq!(Float::copysign(-3.0f64, 1.0), 3.0);
    }

    #[test]
    fn min_max() {
        assert_eq!(MinMax::min(3, 7), 3);
        assert_eq!(MinMax::max(3u8, 7), 7);
        assert_eq!(MinMax::min(f32::NAN, 1.0), 1.0);
    }
}
