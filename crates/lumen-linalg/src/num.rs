//! Compensated floating-point kernels.
//!
//! Expressions like `a * b - c * d` lose most of their significant bits when the two products are
//! close in magnitude. The functions in this module use a fused multiply-add to recover the
//! rounding error of a product and add it back as a correction term, which keeps the result
//! within a couple of ULPs of the exact value.
//!
//! None of the kernels guard against overflow: if an intermediate product exceeds the range of
//! `T`, the result is `NaN` or an infinity, exactly as with the naive formula.

use crate::Float;

/// Computes `a * b - c * d` with a compensated product.
///
/// The rounding error of `c * d` is captured by a second fused multiply-add and added to the
/// result, so cancellation between the two products does not destroy precision. The result is
/// within 1.5 ULPs of the exact value, which can be 2 ULPs away from the correctly rounded one.
///
/// # Examples
///
/// ```
/// # use lumen_linalg::num::difference_of_products;
/// assert_eq!(difference_of_products(3.0, 4.0, 2.0, 5.0), 2.0);
/// assert_eq!(difference_of_products(0.0, 7.0, 0.0, 9.0), 0.0);
/// ```
#[inline]
pub fn difference_of_products<T: Float>(a: T, b: T, c: T, d: T) -> T {
    let cd = c * d;
    let diff = a.mul_add(b, -cd);
    let err = (-c).mul_add(d, cd);
    diff + err
}

/// Computes `a * b + c * d` with a compensated product.
///
/// This is [`difference_of_products`] with the sign of the second product flipped.
///
/// # Examples
///
/// ```
/// # use lumen_linalg::num::sum_of_products;
/// assert_eq!(sum_of_products(3.0, 4.0, 2.0, 5.0), 22.0);
/// ```
#[inline]
pub fn sum_of_products<T: Float>(a: T, b: T, c: T, d: T) -> T {
    let cd = c * d;
    let sum = a.mul_add(b, cd);
    let err = c.mul_add(d, -cd);
    sum + err
}

/// Splits `a * b` into the rounded product and its exact rounding error.
///
/// The returned `(product, error)` satisfy `product + error == a * b` exactly (barring overflow
/// and underflow).
#[inline]
pub fn two_product<T: Float>(a: T, b: T) -> (T, T) {
    let product = a * b;
    let error = a.mul_add(b, -product);
    (product, error)
}

/// Splits `a + b` into the rounded sum and its exact rounding error (Knuth's *TwoSum*).
#[inline]
pub fn two_sum<T: Float>(a: T, b: T) -> (T, T) {
    let sum = a + b;
    let delta = sum - a;
    let error = (a - (sum - delta)) + (b - delta);
    (sum, error)
}

/// Computes the sum of the products of each pair in `terms`, compensating for the rounding error
/// of every product and every partial sum.
///
/// An empty slice yields zero.
///
/// # Examples
///
/// ```
/// # use lumen_linalg::num::inner_product;
/// let dot = inner_product(&[(1.0, 4.0), (2.0, 5.0), (3.0, 6.0)]);
/// assert_eq!(dot, 32.0);
/// ```
pub fn inner_product<T: Float>(terms: &[(T, T)]) -> T {
    let mut sum = T::ZERO;
    let mut error = T::ZERO;
    // Accumulate back to front, matching the right-nested form `a0*b0 + (a1*b1 + (...))`.
    for &(a, b) in terms.iter().rev() {
        let (product, product_err) = two_product(a, b);
        let (s, sum_err) = two_sum(product, sum);
        sum = s;
        error = product_err + (error + sum_err);
    }
    sum + error
}

/// Evaluates the polynomial `c[0] + c[1]*t + c[2]*t^2 + ... + c[n]*t^n` using Horner's method.
///
/// Evaluation starts at the highest-order coefficient and repeatedly multiplies by `t` and adds
/// the next lower coefficient with a fused multiply-add, so the cost is linear in the number of
/// coefficients.
///
/// - An empty coefficient list evaluates to zero.
/// - A single coefficient is returned as-is, for any `t` (even infinite or `NaN` ones).
/// - All-zero coefficients evaluate to exactly zero for any finite `t`.
///
/// # Examples
///
/// ```
/// # use lumen_linalg::num::evaluate_polynomial;
/// // 1 + 2t + 3t²
/// assert_eq!(evaluate_polynomial(2.0, &[1.0, 2.0, 3.0]), 17.0);
/// assert_eq!(evaluate_polynomial(f32::NAN, &[5.0]), 5.0);
/// ```
pub fn evaluate_polynomial<T: Float>(t: T, coefficients: &[T]) -> T {
    let Some((&highest, rest)) = coefficients.split_last() else {
        return T::ZERO;
    };
    rest.iter().rev().fold(highest, |acc, &c| acc.mul_add(t, c))
}

/// Solves `a*t^2 + b*t + c = 0` for real `t`.
///
/// Returns [`None`] if there are no real roots, and `Some((t0, t1))` with `t0 <= t1` otherwise. A
/// repeated root is returned twice.
///
/// The discriminant is computed with [`difference_of_products`], and the roots with the
/// cancellation-free form `q = -(b + sign(b) * sqrt(D)) / 2`, `t0 = q / a`, `t1 = c / q`, so both
/// roots stay accurate even when `b^2` is much larger than `4ac`.
///
/// Degenerate inputs are handled as follows:
///
/// - If `a` is zero, the linear equation `b*t + c = 0` is solved instead and its root is returned
///   twice. If `b` is zero as well, there is no root to report and [`None`] is returned (this
///   includes the trivial equation `0 = 0`).
/// - If `q` is zero (only possible when `b` and `c` are both zero), the double root `0` is
///   returned.
/// - A tiny but non-zero `a` still takes the regular path: the small root is computed as `c / q`
///   and stays accurate, the other one grows without bound like `-b / a`.
///
/// # Examples
///
/// ```
/// # use lumen_linalg::num::quadratic;
/// assert_eq!(quadratic(1.0, -3.0, 2.0), Some((1.0, 2.0)));
/// assert_eq!(quadratic(1.0, 2.0, 1.0), Some((-1.0, -1.0)));
/// assert_eq!(quadratic(1.0, 0.0, 1.0), None);
/// ```
pub fn quadratic<T: Float>(a: T, b: T, c: T) -> Option<(T, T)> {
    if a == T::ZERO {
        if b == T::ZERO {
            return None;
        }
        let t = -c / b;
        return Some((t, t));
    }

    let discriminant = difference_of_products(b, b, T::FOUR * a, c);
    if discriminant < T::ZERO || discriminant.is_nan() {
        return None;
    }

    let root = discriminant.sqrt();
    let q = -T::HALF * (b + root.copysign(b));
    if q == T::ZERO {
        return Some((T::ZERO, T::ZERO));
    }

    let t0 = q / a;
    let t1 = c / q;
    if t0 > t1 {
        Some((t1, t0))
    } else {
        Some((t0, t1))
    }
}
