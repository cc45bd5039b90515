//! Named-field access (`v.x`, `v.y`, ...) for short vectors.

use std::ops::{Deref, DerefMut};

use super::Vector;

#[repr(C)]
pub struct XY<T> {
    pub x: T,
    pub y: T,
    _priv: (), // prevent external construction
}

#[repr(C)]
pub struct XYZ<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    _priv: (),
}

#[repr(C)]
pub struct XYZW<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
    _priv: (),
}

macro_rules! view {
    ($n:literal => $view:ident) => {
        impl<T> Deref for Vector<T, $n> {
            type Target = $view<T>;

            #[inline]
            fn deref(&self) -> &$view<T> {
                // Safety: `$view<T>` is `#[repr(C)]` with `$n` fields of type `T` followed by a
                // ZST, which has the same layout as `[T; $n]`.
                unsafe { &*(self as *const Self).cast::<$view<T>>() }
            }
        }

        impl<T> DerefMut for Vector<T, $n> {
            #[inline]
            fn deref_mut(&mut self) -> &mut $view<T> {
                // Safety: see above.
                unsafe { &mut *(self as *mut Self).cast::<$view<T>>() }
            }
        }
    };
}

view!(2 => XY);
view!(3 => XYZ);
view!(4 => XYZW);
