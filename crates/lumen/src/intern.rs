//! Deduplication of geometric values.
//!
//! Scenes tend to contain many copies of the same transform or material parameters. An
//! [`InternCache`] keeps a single shared copy of each distinct value, identified by its structural
//! hash (see [`crate::linalg::hash`]).

use std::{collections::HashMap, fmt, sync::Arc};

use crate::linalg::hash::{HashKey, StructuralHash};

/// A cache that hands out one shared [`Arc`] per structurally distinct value.
///
/// Two values are the same if [`StructuralHash::structural_eq`] says so. For floating-point
/// components that means `0.0` and `-0.0` are merged, while values that differ in any bit
/// otherwise are kept apart (there is no tolerance).
///
/// Hit and miss counts are collected, and are displayed together with the cache's name when the
/// cache is formatted with `{}`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use lumen::{intern::InternCache, linalg::vec3};
///
/// let mut cache = InternCache::new("positions");
/// let a = cache.intern(vec3(1.0f32, 2.0, 3.0));
/// let b = cache.intern(vec3(1.0, 2.0, 3.0));
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.to_string(), "positions: 1 values, 1 hits, 1 misses");
/// ```
pub struct InternCache<V> {
    name: &'static str,
    entries: HashMap<HashKey<V>, Arc<V>>,
    hits: u64,
    misses: u64,
}

impl<V: StructuralHash + Clone> InternCache<V> {
    /// Creates an empty cache. `name` is used in log messages and the [`fmt::Display`] output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the shared copy of `value`, storing it first if no equal value is cached.
    pub fn intern(&mut self, value: V) -> Arc<V> {
        let key = HashKey(value);
        if let Some(shared) = self.entries.get(&key) {
            self.hits += 1;
            return shared.clone();
        }

        self.misses += 1;
        let shared = Arc::new(key.0.clone());
        self.entries.insert(key, shared.clone());
        log::trace!(
            "{}: interned new value (hash {:#010x}, {} total)",
            self.name,
            shared.structural_hash(),
            self.entries.len(),
        );
        shared
    }

    /// Returns the cached copy of `value`, if there is one.
    ///
    /// Unlike [`InternCache::intern`], this does not affect the hit and miss counts.
    pub fn get(&self, value: &V) -> Option<&Arc<V>> {
        self.entries.get(&HashKey(value.clone()))
    }

    /// Returns the number of distinct values in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many calls to [`InternCache::intern`] found an existing value.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns how many calls to [`InternCache::intern`] stored a new value.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops all cached values and resets the statistics.
    ///
    /// `Arc`s handed out earlier stay valid, but are no longer shared with future calls.
    pub fn clear(&mut self) {
        log::debug!(
            "{}: clearing {} values ({} hits, {} misses)",
            self.name,
            self.entries.len(),
            self.hits,
            self.misses,
        );
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl<V> fmt::Display for InternCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} values, {} hits, {} misses",
            self.name,
            self.entries.len(),
            self.hits,
            self.misses
        )
    }
}

impl<V> fmt::Debug for InternCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternCache")
            .field("name", &self.name)
            .field("len", &self.entries.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::linalg::{vec2, vec3, Mat3f, Quat, Transform, Vec3f};

    use super::*;

    #[test]
    fn deduplicates() {
        let mut cache = InternCache::new("test");
        let a = cache.intern(vec3(1.0f32, 2.0, 3.0));
        let b = cache.intern(vec3(4.0, 5.0, 6.0));
        let c = cache.intern(vec3(1.0, 2.0, 3.0));

        assert!(Arc::ptr_eq(&a, &c));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
        assert_eq!((cache.hits(), cache.misses()), (1, 2));
    }

    #[test]
    fn signed_zero_is_one_value() {
        let mut cache = InternCache::new("zero");
        let a = cache.intern(vec2(0.0f64, 1.0));
        let b = cache.intern(vec2(-0.0, 1.0));
        assert!(Arc::ptr_eq(&a, &b));
        // The first value stored wins.
        assert!(a[0].is_sign_positive());
    }

    #[test]
    fn no_tolerance() {
        let mut cache = InternCache::new("exact");
        cache.intern(1.0f32);
        cache.intern(1.0 + f32::EPSILON);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn get_does_not_count() {
        let mut cache = InternCache::new("get");
        let rotation = Transform::<f32, 3>::from_quat(Quat::from_rotation_z(0.5)).matrix();
        assert!(cache.get(&rotation).is_none());

        let shared = cache.intern(rotation);
        let found = cache.get(&rotation).cloned();
        assert!(found.is_some_and(|found| Arc::ptr_eq(&found, &shared)));
        assert!(cache.get(&Mat3f::IDENTITY).is_none());
        assert_eq!((cache.hits(), cache.misses()), (0, 1));
    }

    #[test]
    fn clear_resets() {
        let mut cache = InternCache::<Vec3f>::new("clear");
        let before = cache.intern(Vec3f::X);
        cache.intern(Vec3f::X);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.to_string(), "clear: 0 values, 0 hits, 0 misses");

        let after = cache.intern(Vec3f::X);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }

    #[test]
    fn quaternions() {
        let mut cache = InternCache::new("rotations");
        for _ in 0..10 {
            cache.intern(Quat::from_rotation_x(1.0f32));
        }
        cache.intern(Quat::from_rotation_x(-1.0f32));
        assert_eq!(
            format!("{cache:?}"),
            "InternCache { name: \"rotations\", len: 2, hits: 9, misses: 2 }"
        );
    }
}
