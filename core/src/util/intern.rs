//! Canonicalization of equal values.
//!
//! An [`Interner`] keeps one shared instance of each distinct value it has
//! seen. Interning a value equal to one already in the cache returns the
//! cached instance instead, so that equal values can afterwards be compared
//! by pointer, and many copies of the same value share one allocation.
//!
//! Equality here is *exact*: two values are the same if their components
//! have the same bit patterns, except that `-0.0` is treated as `0.0` and
//! all NaNs are treated as one. Approximate equality cannot be used because
//! it is not transitive.

use alloc::collections::btree_map::{BTreeMap, Entry};
use alloc::sync::Arc;
use core::fmt::{self, Debug, Formatter};

use crate::error::Result;
use crate::geom::Ray;
use crate::math::basis::Basis;
use crate::math::mat::Matrix;
use crate::math::num::Scalar;
use crate::math::point::Point;
use crate::math::quat::Quat;
use crate::math::space::Affine;
use crate::math::vec::Vector;
use crate::util::check;

/// Trait for values that can be interned.
pub trait Intern {
    /// A totally ordered key identifying the value exactly.
    type Key: Ord;

    /// Returns the key of `self`.
    ///
    /// Two values must have the same key if and only if they are the same
    /// value in the sense described in the [module docs][self].
    fn key(&self) -> Self::Key;
}

/// A cache of canonical instances of values of type `T`.
///
/// The cache only grows until [cleared][Self::clear]. It performs no
/// internal synchronization; all mutating methods take `&mut self`, so to
/// share an interner between threads, wrap it in a lock.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use rayform_core::math::{vec3, Vec3};
/// use rayform_core::util::intern::Interner;
///
/// let mut cache = Interner::new();
/// let a: Arc<Vec3> = cache.intern(vec3(1.0, 2.0, 3.0));
/// let b = cache.intern(vec3(1.0, 2.0, 3.0));
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct Interner<T: Intern> {
    map: BTreeMap<T::Key, Arc<T>>,
}

impl<T: Intern> Interner<T> {
    /// Returns a new, empty interner.
    pub fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    /// Returns the canonical instance of `value`.
    ///
    /// If an equal value is already cached, returns the cached instance and
    /// drops `value`; otherwise caches and returns `value`.
    pub fn intern(&mut self, value: T) -> Arc<T> {
        let len = self.map.len();
        match self.map.entry(value.key()) {
            Entry::Occupied(e) => e.get().clone(),
            Entry::Vacant(e) => {
                log::trace!("interning new value, {} cached", len + 1);
                e.insert(Arc::new(value)).clone()
            }
        }
    }

    /// Returns the canonical instance of `value`, which must be present.
    ///
    /// # Errors
    /// [`Error::NullArgument`][crate::Error::NullArgument] if `value` is
    /// `None`.
    pub fn get_cached(
        &mut self,
        value: impl Into<Option<T>>,
    ) -> Result<Arc<T>> {
        let value = check::present(value.into(), "value to intern")?;
        Ok(self.intern(value))
    }

    /// Returns the cached instance equal to `value`, if any, without
    /// inserting anything.
    pub fn get(&self, value: &T) -> Option<&Arc<T>> {
        self.map.get(&value.key())
    }

    /// Returns the number of distinct values cached.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes all values from the cache.
    ///
    /// Instances returned earlier remain valid, but are no longer canonical:
    /// interning an equal value afterwards returns a new instance.
    pub fn clear(&mut self) {
        log::debug!("clearing {} interned values", self.map.len());
        self.map.clear();
    }

    /// Returns an iterator over the cached instances, in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.map.values()
    }
}

impl<T: Intern> Default for Interner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Intern> Debug for Interner<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("len", &self.map.len())
            .finish()
    }
}

//
// Intern impls
//

impl<Sc: Scalar, Sp, const N: usize> Intern for Vector<[Sc; N], Sp> {
    type Key = [u64; N];

    fn key(&self) -> [u64; N] {
        self.0.map(Scalar::key)
    }
}

impl<Sc: Scalar, Sp, const N: usize> Intern for Point<[Sc; N], Sp> {
    type Key = [u64; N];

    fn key(&self) -> [u64; N] {
        self.0.map(Scalar::key)
    }
}

impl<Sc: Scalar> Intern for Quat<Sc> {
    type Key = [u64; 4];

    fn key(&self) -> [u64; 4] {
        self.0.map(Scalar::key)
    }
}

impl<Sc: Scalar, M, const N: usize> Intern for Matrix<[[Sc; N]; N], M> {
    type Key = [[u64; N]; N];

    fn key(&self) -> Self::Key {
        self.0.map(|row| row.map(Scalar::key))
    }
}

impl<Sc: Scalar, B> Intern for Basis<Sc, B> {
    type Key = [[u64; 3]; 3];

    fn key(&self) -> Self::Key {
        [self.w.key(), self.v.key(), self.u.key()]
    }
}

impl<T> Intern for Ray<T>
where
    T: Affine + Intern,
    T::Diff: Intern,
{
    type Key = (T::Key, <T::Diff as Intern>::Key);

    fn key(&self) -> Self::Key {
        (self.0.key(), self.1.key())
    }
}
