//! The single-threaded table a [`GrowableMap`](crate::GrowableMap) keeps its
//! entries in.
//!
//! The map never touches buckets itself. It only needs a table that can
//! insert, look up, iterate, report how many buckets it has, and be refilled
//! from another table with a larger bucket count. [`Table`] is implemented
//! for `hashbrown::HashMap` and `std::collections::HashMap`.

use crate::error::Error;
use std::hash::{BuildHasher, Hash};

/// Capability set required from the table behind a GrowableMap.
pub trait Table<K, V>: Default + Clone {
    /// Iterator over the table's entries.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Create an empty table with room for at least `buckets` buckets.
    ///
    /// The hashbrown and std tables round the count up to a power of two.
    fn try_with_buckets(buckets: usize) -> Result<Self, Error>;

    /// Insert or replace a value, returning the replaced value if any.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Look up a key.
    fn get(&self, key: &K) -> Option<&V>;

    /// Number of entries in the table.
    fn len(&self) -> usize;

    /// Check if the table is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets in the table's current allocation.
    fn bucket_count(&self) -> usize;

    /// Iterate over all entries.
    fn iter(&self) -> Self::Iter<'_>;

    /// Clear this table, size it for at least `buckets` buckets and copy
    /// every entry of `source` into it.
    fn try_refill(&mut self, source: &Self, buckets: usize) -> Result<(), Error>;
}

/// Usable capacity of a table with at least `buckets` buckets.
///
/// The count is rounded up to a power of two, then mirrors the hashbrown
/// growth rule: small tables can fill all but one bucket, larger ones 7/8
/// of their buckets. A count that cannot be rounded up asks for
/// `usize::MAX`, which the table rejects as an allocation failure.
pub(crate) fn capacity_for_buckets(buckets: usize) -> usize {
    let buckets = match buckets.checked_next_power_of_two() {
        Some(buckets) => buckets,
        None => return usize::MAX,
    };
    if buckets < 8 {
        (buckets - 1).max(1)
    } else {
        buckets / 8 * 7
    }
}

/// Inverse of [`capacity_for_buckets`] for a capacity reported by a table.
pub(crate) fn buckets_for_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        0
    } else if capacity < 7 {
        capacity + 1
    } else {
        capacity / 7 * 8
    }
}

impl<K, V, S> Table<K, V> for hashbrown::HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default + Clone,
{
    type Iter<'a> = hashbrown::hash_map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn try_with_buckets(buckets: usize) -> Result<Self, Error> {
        let mut table = Self::default();
        table
            .try_reserve(capacity_for_buckets(buckets))
            .map_err(|_| Error::AllocationFailed { buckets })?;
        Ok(table)
    }

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        hashbrown::HashMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        hashbrown::HashMap::get(self, key)
    }

    fn len(&self) -> usize {
        hashbrown::HashMap::len(self)
    }

    fn bucket_count(&self) -> usize {
        buckets_for_capacity(self.capacity())
    }

    fn iter(&self) -> Self::Iter<'_> {
        hashbrown::HashMap::iter(self)
    }

    fn try_refill(&mut self, source: &Self, buckets: usize) -> Result<(), Error> {
        self.clear();
        self.try_reserve(capacity_for_buckets(buckets).max(source.len()))
            .map_err(|_| Error::AllocationFailed { buckets })?;
        self.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }
}

impl<K, V, S> Table<K, V> for std::collections::HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default + Clone,
{
    type Iter<'a> = std::collections::hash_map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn try_with_buckets(buckets: usize) -> Result<Self, Error> {
        let mut table = Self::default();
        table
            .try_reserve(capacity_for_buckets(buckets))
            .map_err(|_| Error::AllocationFailed { buckets })?;
        Ok(table)
    }

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        std::collections::HashMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        std::collections::HashMap::get(self, key)
    }

    fn len(&self) -> usize {
        std::collections::HashMap::len(self)
    }

    fn bucket_count(&self) -> usize {
        buckets_for_capacity(self.capacity())
    }

    fn iter(&self) -> Self::Iter<'_> {
        std::collections::HashMap::iter(self)
    }

    fn try_refill(&mut self, source: &Self, buckets: usize) -> Result<(), Error> {
        self.clear();
        self.try_reserve(capacity_for_buckets(buckets).max(source.len()))
            .map_err(|_| Error::AllocationFailed { buckets })?;
        self.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }
}
