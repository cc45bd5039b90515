//! Structural hashing of geometric values.
//!
//! Floating-point types don't implement [`Hash`] or [`Eq`], so vectors, matrices and quaternions
//! can't be used as keys of a [`HashMap`][std::collections::HashMap] directly. This module derives
//! a hash code purely from a value's components instead:
//!
//! - [`StructuralHash`] is implemented for [`f32`], [`f64`], [`Vector`], [`Matrix`] and [`Quat`].
//! - [`hash`] is the entry point computing the 32-bit hash code of a value.
//! - [`HashKey`] wraps a value so that it implements [`Hash`] and [`Eq`].
//!
//! The hash is deterministic: it doesn't depend on process-wide state or a random seed, so the
//! same value hashes to the same code in every run and on every platform.
//!
//! # Examples
//!
//! ```
//! # use lumen_linalg::{hash::{self, HashKey}, vec3};
//! use std::collections::HashSet;
//!
//! assert_eq!(hash::hash(&vec3(1.0, 2.0, 3.0)), hash::hash(&vec3(1.0, 2.0, 3.0)));
//! assert_ne!(hash::hash(&vec3(1.0, 2.0, 3.0)), hash::hash(&vec3(3.0, 2.0, 1.0)));
//!
//! let mut set = HashSet::new();
//! set.insert(HashKey(vec3(0.0, 1.0, 0.0)));
//! assert!(set.contains(&HashKey(vec3(-0.0, 1.0, 0.0))));
//! ```

use std::hash::{Hash, Hasher};

use crate::{Matrix, Quat, Vector};

/// Types whose hash code is derived from their components.
///
/// Implementations must uphold `a.structural_eq(b) => a.structural_hash() == b.structural_hash()`,
/// and `structural_eq` must be an equivalence relation (unlike `==` on floats, which is not
/// reflexive for `NaN`).
pub trait StructuralHash {
    fn structural_hash(&self) -> u32;

    fn structural_eq(&self, other: &Self) -> bool;
}

/// Computes the structural hash code of `value`.
#[inline]
pub fn hash<V: StructuralHash + ?Sized>(value: &V) -> u32 {
    value.structural_hash()
}

/// Folds `hash` into the running hash code `seed`.
///
/// The fold is order-sensitive: combining `a` then `b` generally differs from `b` then `a`.
#[inline]
pub fn combine(seed: u32, hash: u32) -> u32 {
    seed ^ hash
        .wrapping_add(0x9e3779b9)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// Folds the hash codes of all `values` into one, starting from a zero seed.
fn combine_all<'a, V: StructuralHash + 'a>(values: impl IntoIterator<Item = &'a V>) -> u32 {
    values
        .into_iter()
        .fold(0, |seed, value| combine(seed, value.structural_hash()))
}

/// 32-bit finalizer of MurmurHash3. Spreads every input bit over the whole output.
#[inline]
fn mix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

macro_rules! float_impls {
    ($($t:ty => |$bits:ident| $hash:expr),+ $(,)?) => {
        $(
            impl StructuralHash for $t {
                fn structural_hash(&self) -> u32 {
                    let $bits = canonical_bits!($t, *self);
                    $hash
                }

                fn structural_eq(&self, other: &Self) -> bool {
                    canonical_bits!($t, *self) == canonical_bits!($t, *other)
                }
            }
        )+
    };
}

/// Bit pattern of a float, with `-0.0` mapped to `+0.0` and every `NaN` mapped to one canonical
/// `NaN`.
macro_rules! canonical_bits {
    ($t:ty, $value:expr) => {{
        let value: $t = $value;
        if value == 0.0 {
            0
        } else if value.is_nan() {
            <$t>::NAN.to_bits()
        } else {
            value.to_bits()
        }
    }};
}

float_impls!(
    f32 => |bits| mix32(bits),
    f64 => |bits| combine(combine(0, mix32(bits as u32)), mix32((bits >> 32) as u32)),
);

impl<T: StructuralHash, const N: usize> StructuralHash for Vector<T, N> {
    fn structural_hash(&self) -> u32 {
        combine_all(self.as_slice())
    }

    fn structural_eq(&self, other: &Self) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.structural_eq(b))
    }
}

/// Hashes each column vector, then folds the column hashes.
impl<T: StructuralHash, const R: usize, const C: usize> StructuralHash for Matrix<T, R, C> {
    fn structural_hash(&self) -> u32 {
        combine_all(self.columns())
    }

    fn structural_eq(&self, other: &Self) -> bool {
        self.columns()
            .zip(other.columns())
            .all(|(a, b)| a.structural_eq(b))
    }
}

impl<T: StructuralHash + Copy> StructuralHash for Quat<T> {
    fn structural_hash(&self) -> u32 {
        self.into_vec().structural_hash()
    }

    fn structural_eq(&self, other: &Self) -> bool {
        self.into_vec().structural_eq(&other.into_vec())
    }
}

/// Makes a [`StructuralHash`] type usable as a key in hash-based collections.
///
/// [`Hash`] and [`Eq`] are implemented through [`StructuralHash`], so `0.0` and `-0.0` are the same
/// key, and so are all `NaN`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashKey<V>(pub V);

impl<V> HashKey<V> {
    #[inline]
    pub fn into_inner(self) -> V {
        self.0
    }
}

impl<V: StructuralHash> Hash for HashKey<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.structural_hash());
    }
}

impl<V: StructuralHash> PartialEq for HashKey<V> {
    fn eq(&self, other: &Self) -> bool {
        self.0.structural_eq(&other.0)
    }
}

impl<V: StructuralHash> Eq for HashKey<V> {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{vec2, vec3, Mat2f, Mat3d, Quatf};

    use super::*;

    #[test]
    fn known_values() {
        // Pinned so that accidental changes to the fold or mixer are caught.
        assert_eq!(hash(&0.0f32), 0);
        assert_eq!(hash(&vec2(1.0f32, 2.0)), 0x55cf60ff);
        assert_eq!(hash(&vec2(2.0f32, 1.0)), 0xb06c0519);
        assert_eq!(hash(&vec3(1.0f64, 2.0, 3.0)), 0xbaed574f);
    }

    #[test]
    fn equal_values_hash_equally() {
        let a = Mat3d::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let b = Mat3d::from_fn(|row, col| (row * 3 + col + 1) as f64);
        assert_eq!(hash(&a), hash(&b));
        assert_eq!(hash(&a), hash(&a));
        assert!(a.structural_eq(&b));

        let q = Quatf::from_rotation_x(0.25);
        assert_eq!(hash(&q), hash(&Quatf::from_rotation_x(0.25)));
    }

    #[test]
    fn signed_zero_and_nan() {
        assert_eq!(hash(&0.0f32), hash(&-0.0f32));
        assert_eq!(hash(&0.0f64), hash(&-0.0f64));
        assert_eq!(hash(&vec2(-0.0, 1.0)), hash(&vec2(0.0, 1.0)));

        let nan = f64::NAN;
        let other_nan = f64::from_bits(nan.to_bits() ^ 1);
        assert!(other_nan.is_nan());
        assert_eq!(hash(&nan), hash(&other_nan));
        assert!(nan.structural_eq(&other_nan));
        assert!(!1.0f64.structural_eq(&nan));
    }

    #[test]
    fn order_sensitive() {
        assert_ne!(hash(&vec3(1.0, 2.0, 3.0)), hash(&vec3(3.0, 2.0, 1.0)));

        let m = Mat2f::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_ne!(hash(&m), hash(&m.transpose()));
        assert!(!m.structural_eq(&m.transpose()));
    }

    #[test]
    fn matrix_folds_columns() {
        let m = Mat2f::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let expected = combine(combine(0, hash(&m.column(0))), hash(&m.column(1)));
        assert_eq!(hash(&m), expected);
    }

    #[test]
    fn hash_key() {
        let mut counts = HashMap::new();
        for v in [vec2(1.0f32, 0.0), vec2(1.0, -0.0), vec2(0.0, 1.0)] {
            *counts.entry(HashKey(v)).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&HashKey(vec2(1.0, 0.0))], 2);
        assert_eq!(HashKey(vec2(f32::NAN, 0.0)), HashKey(vec2(f32::NAN, 0.0)));
    }
}
