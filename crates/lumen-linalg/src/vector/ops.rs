//! Operator overloads for [`Vector`].

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::approx::ApproxEq;

use super::Vector;

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

impl<T, U, const N: usize> PartialEq<Vector<U, N>> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vector<U, N>) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq, const N: usize> Eq for Vector<T, N> {}

impl<T, U, const N: usize> PartialEq<[U; N]> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.0 == *other
    }
}

impl<T, const N: usize> ApproxEq for Vector<T, N>
where
    T: ApproxEq,
{
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.0.abs_diff_eq(&other.0, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.0.rel_diff_eq(&other.0, rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        self.0.ulps_diff_eq(&other.0, ulps_tolerance)
    }
}

/// Element-wise negation.
impl<T: Neg, const N: usize> Neg for Vector<T, N> {
    type Output = Vector<T::Output, N>;

    fn neg(self) -> Self::Output {
        self.map(T::neg)
    }
}

/// Defines an element-wise binary operator together with its assigning form.
macro_rules! elementwise {
    ($op:ident::$method:ident, $assign:ident::$assign_method:ident) => {
        impl<T: $op, const N: usize> $op<Vector<T, N>> for Vector<T, N> {
            type Output = Vector<T::Output, N>;

            #[inline]
            fn $method(self, rhs: Vector<T, N>) -> Self::Output {
                self.zip(rhs).map(|(l, r)| l.$method(r))
            }
        }

        impl<T: $assign, const N: usize> $assign<Vector<T, N>> for Vector<T, N> {
            #[inline]
            fn $assign_method(&mut self, rhs: Vector<T, N>) {
                for (l, r) in self.0.iter_mut().zip(rhs.0) {
                    l.$assign_method(r);
                }
            }
        }
    };
}

elementwise!(Add::add, AddAssign::add_assign);
elementwise!(Sub::sub, SubAssign::sub_assign);
// `*` and `/` between two vectors operate element-wise (Hadamard product/quotient).
elementwise!(Mul::mul, MulAssign::mul_assign);
elementwise!(Div::div, DivAssign::div_assign);

// Supporting both `Vector * Vector` and `Vector * T` rules out a blanket `Mul<U>` impl.

/// Vector-scalar multiplication.
impl<T: Mul + Copy, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Vector<T::Output, N>;

    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        self.map(|elem| elem * rhs)
    }
}

impl<T: MulAssign + Copy, const N: usize> MulAssign<T> for Vector<T, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        self.0.iter_mut().for_each(|elem| *elem *= rhs);
    }
}

/// Vector-scalar division.
impl<T: Div + Copy, const N: usize> Div<T> for Vector<T, N> {
    type Output = Vector<T::Output, N>;

    #[inline]
    fn div(self, rhs: T) -> Self::Output {
        self.map(|elem| elem / rhs)
    }
}

impl<T: DivAssign + Copy, const N: usize> DivAssign<T> for Vector<T, N> {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        self.0.iter_mut().for_each(|elem| *elem /= rhs);
    }
}
