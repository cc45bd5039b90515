//! Approximate equality of floating-point values and the types built from them.
//!
//! [`ApproxEq`] offers three ways of comparing values: by *absolute* difference, by *relative*
//! difference, and by the number of representable values between them (*ULPs*). Compound types
//! (vectors, matrices, quaternions, transforms) compare equal if every one of their components
//! does.
//!
//! [`equal`] is the plain epsilon comparison used throughout the library. The
//! [`assert_approx_eq!`][crate::assert_approx_eq] and
//! [`assert_approx_ne!`][crate::assert_approx_ne] macros are meant for tests.
//!
//! For background on why there is no single right way to compare floats, see
//! <https://randomascii.wordpress.com/2012/02/25/comparing-floating-point-numbers-2012-edition/>.

mod impls;

use std::{fmt, panic::Location};

/// Types that can be compared for *approximate equality*.
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// Type of the absolute and relative tolerance (the underlying float type).
    type Tolerance: DefaultTolerances + Copy;

    /// Returns `true` if `|self - other| <= abs_tolerance` for every component.
    fn abs_diff_eq(&self, other: &Rhs, abs_tolerance: Self::Tolerance) -> bool;

    /// Returns `true` if `|self - other| <= max(|self|, |other|) * rel_tolerance` for every
    /// component.
    fn rel_diff_eq(&self, other: &Rhs, rel_tolerance: Self::Tolerance) -> bool;

    /// Returns `true` if at most `ulps_tolerance` representable values lie between each pair of
    /// components.
    ///
    /// `NaN` never compares equal. `-0.0` and `+0.0` do; other values of differing sign do not.
    fn ulps_diff_eq(&self, other: &Rhs, ulps_tolerance: u32) -> bool;
}

/// Compares `a` and `b` component-wise with an absolute tolerance of `epsilon`.
///
/// This is a shorthand for [`ApproxEq::abs_diff_eq`].
///
/// # Examples
///
/// ```
/// # use lumen_linalg::{approx::equal, vec3};
/// assert!(equal(&vec3(1.0, 2.0, 3.0), &vec3(1.0, 2.05, 3.0), 0.1));
/// assert!(!equal(&vec3(1.0, 2.0, 3.0), &vec3(1.0, 2.5, 3.0), 0.1));
/// ```
pub fn equal<T: ApproxEq + ?Sized>(a: &T, b: &T, epsilon: T::Tolerance) -> bool {
    a.abs_diff_eq(b, epsilon)
}

/// Default tolerances of a [`ApproxEq::Tolerance`] type.
///
/// These are used by [`assert_approx_eq!`][crate::assert_approx_eq] when no comparison is
/// configured explicitly.
pub trait DefaultTolerances {
    const DEFAULT_ABS_TOLERANCE: Self;
    const DEFAULT_REL_TOLERANCE: Self;
    const DEFAULT_ULPS_TOLERANCE: u32;
}

impl DefaultTolerances for f32 {
    const DEFAULT_ABS_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_REL_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_ULPS_TOLERANCE: u32 = 4;
}

impl DefaultTolerances for f64 {
    const DEFAULT_ABS_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_REL_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_ULPS_TOLERANCE: u32 = 4;
}

/// Guard returned by [`assert_approx_eq!`][crate::assert_approx_eq] and
/// [`assert_approx_ne!`][crate::assert_approx_ne].
///
/// The assertion is checked when the guard is dropped. Before that, [`Asserter::abs`],
/// [`Asserter::rel`] and [`Asserter::ulps`] select the comparisons to run. The values are equal
/// if *any* selected comparison says so.
///
/// Without any selection, an absolute comparison with
/// [`DEFAULT_ABS_TOLERANCE`][DefaultTolerances::DEFAULT_ABS_TOLERANCE] and a relative comparison
/// with [`DEFAULT_REL_TOLERANCE`][DefaultTolerances::DEFAULT_REL_TOLERANCE] are performed.
pub struct Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    left: &'a T,
    right: &'a T,
    kind: AssertionKind,
    location: &'static Location<'static>,
    msg: Option<fmt::Arguments<'a>>,
    abs: Option<T::Tolerance>,
    rel: Option<T::Tolerance>,
    ulps: Option<u32>,
}

impl<'a, T> Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    #[doc(hidden)]
    #[track_caller]
    pub fn new(
        left: &'a T,
        right: &'a T,
        kind: AssertionKind,
        msg: Option<fmt::Arguments<'a>>,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            location: Location::caller(),
            msg,
            abs: None,
            rel: None,
            ulps: None,
        }
    }

    /// Compare by absolute difference.
    ///
    /// Good for values near zero, or values of opposing sign.
    pub fn abs(&mut self, abs: T::Tolerance) -> &mut Self {
        self.abs = Some(abs);
        self
    }

    /// Compare by difference relative to the larger magnitude.
    ///
    /// Good for values away from zero. Any non-zero value needs a relative tolerance of at least
    /// 1.0 to compare equal to 0.0.
    pub fn rel(&mut self, rel: T::Tolerance) -> &mut Self {
        self.rel = Some(rel);
        self
    }

    /// Compare by the number of representable values between the operands.
    ///
    /// This follows the uneven density of floats, which makes it the natural way to state
    /// accuracy bounds of numerical kernels ("within 2 ULPs of the exact result").
    pub fn ulps(&mut self, ulps: u32) -> &mut Self {
        self.ulps = Some(ulps);
        self
    }

    fn equal(&self) -> bool {
        let abs = self
            .abs
            .map_or(false, |abs| self.left.abs_diff_eq(self.right, abs));
        let rel = self
            .rel
            .map_or(false, |rel| self.left.rel_diff_eq(self.right, rel));
        let ulps = self
            .ulps
            .map_or(false, |ulps| self.left.ulps_diff_eq(self.right, ulps));
        abs || rel || ulps
    }
}

impl<'a, T> Drop for Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    // `#[track_caller]` has no effect on `drop`, so the caller location is captured in `new`
    // and printed manually.
    fn drop(&mut self) {
        if self.abs.is_none() && self.rel.is_none() && self.ulps.is_none() {
            self.abs = Some(T::Tolerance::DEFAULT_ABS_TOLERANCE);
            self.rel = Some(T::Tolerance::DEFAULT_REL_TOLERANCE);
        }

        let equal = self.equal();
        let failed = match self.kind {
            AssertionKind::Eq => !equal,
            AssertionKind::Ne => equal,
        };
        if failed {
            assertion_failed(self.left, self.right, self.kind, self.location, self.msg);
        }
    }
}

#[cold]
fn assertion_failed(
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    kind: AssertionKind,
    location: &Location<'_>,
    msg: Option<fmt::Arguments<'_>>,
) -> ! {
    let op = match kind {
        AssertionKind::Eq => "==",
        AssertionKind::Ne => "!=",
    };
    match msg {
        Some(msg) => panic!(
            "assertion `left {op} right` failed at {location}: {msg}\n  left: {left:?}\n right: {right:?}"
        ),
        None => panic!(
            "assertion `left {op} right` failed at {location}\n  left: {left:?}\n right: {right:?}"
        ),
    }
}

#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssertionKind {
    Eq,
    Ne,
}

/// Asserts that two expressions are approximately equal (using [`ApproxEq`]).
///
/// Works like [`assert_eq!`], but returns an [`Asserter`] that selects the comparison method and
/// tolerance.
///
/// # Examples
///
/// ```
/// # use lumen_linalg::*;
/// let one = (0..10).fold(0.0, |acc, _| acc + 0.1);
/// assert_approx_eq!(one, 1.0);
/// assert_approx_eq!(100.0, 99.0).abs(1.0);
/// assert_approx_eq!(100.0, 99.0).rel(0.01);
/// assert_approx_eq!(1.0, 1.0 + f64::EPSILON).ulps(1);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Eq,
            ::core::option::Option::None,
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Eq,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Asserts that two expressions are *not* approximately equal (using [`ApproxEq`]).
///
/// The counterpart of [`assert_approx_eq!`].
///
/// # Examples
///
/// ```
/// # use lumen_linalg::*;
/// assert_approx_ne!(100.0, 99.0).abs(0.5);
/// assert_approx_ne!(1.0, 1.0 + 2.0 * f64::EPSILON).ulps(1);
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Ne,
            ::core::option::Option::None,
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Ne,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::equal;

    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn fail_eq() {
        assert_approx_eq!(1.0, 2.0);
    }

    #[test]
    #[should_panic(expected = "assertion `left != right` failed")]
    fn fail_ne() {
        assert_approx_ne!(1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "determinant drifted")]
    fn custom_message() {
        assert_approx_eq!(1.0, 2.0, "determinant drifted");
    }

    #[test]
    fn any_method_suffices() {
        assert_approx_eq!(1000.0, 1001.0).abs(0.5).rel(0.01);
        assert_approx_ne!(1000.0, 1001.0).abs(0.5).rel(0.0001);
    }

    #[test]
    fn signs() {
        assert_approx_ne!(1.0, -1.0);
        assert_approx_eq!(1.0, -1.0).abs(2.0);
        assert_approx_eq!(1.0, -1.0).rel(2.0);
        assert_approx_eq!(0.0, -0.0).ulps(0);
    }

    #[test]
    fn nan_is_never_equal() {
        assert_approx_ne!(f32::NAN, f32::NAN).abs(1.0);
        assert_approx_ne!(f32::NAN, f32::NAN).rel(1.0);
        assert_approx_ne!(f32::NAN, f32::NAN).ulps(100);
        assert_approx_ne!(f64::NAN, 0.0).abs(f64::INFINITY);
    }

    #[test]
    fn infinities() {
        assert_approx_eq!(f64::INFINITY, f64::INFINITY).abs(0.0);
        assert_approx_ne!(f64::INFINITY, f64::NEG_INFINITY).abs(f64::MAX);
        assert_approx_ne!(f32::MAX, f32::INFINITY).abs(1e30);
        assert_approx_eq!(f32::MAX, f32::INFINITY).ulps(1);
    }

    #[test]
    fn equal_fn() {
        assert!(equal(&1.0f32, &1.0000001, 1e-6));
        assert!(!equal(&1.0f32, &1.01, 1e-6));
        assert!(equal(&[1.0, 2.0], &[1.0, 2.0 + 1e-9], 1e-7));
        assert!(!equal(&f64::NAN, &f64::NAN, 1.0));
    }
}
