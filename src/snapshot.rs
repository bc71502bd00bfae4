use crate::iter::SnapshotIter;
use crate::table::Table;
use std::marker::PhantomData;
use std::sync::Arc;

/// Read-only handle to the table a GrowableMap held at the moment of
/// [`share`](crate::GrowableMap::share).
///
/// The map never writes into a table a snapshot can see: resizes swap in a
/// different table and fast-path writes copy a shared table first. A
/// snapshot therefore stays the same no matter what happens to the map
/// afterwards, and stays alive for as long as the handle does.
pub struct Snapshot<K, V, T> {
    table: Arc<T>,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V, T> Snapshot<K, V, T>
where
    T: Table<K, V>,
{
    pub(crate) fn new(table: Arc<T>) -> Self {
        Self {
            table,
            _entries: PhantomData,
        }
    }

    /// Look up a key. A missing key is `None`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.get(key)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.get(key).is_some()
    }

    /// Number of entries in this snapshot.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if this snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Bucket count of the captured table.
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Iterate over all entries, in no particular order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use growmap::GrowableMap;
    ///
    /// let map = GrowableMap::new(0.75)?;
    /// map.insert(1, "one")?;
    /// map.insert(2, "two")?;
    ///
    /// let snapshot = map.share();
    /// let mut keys: Vec<_> = snapshot.iter().map(|(k, _)| *k).collect();
    /// keys.sort();
    /// assert_eq!(keys, vec![1, 2]);
    /// # Ok::<(), growmap::Error>(())
    /// ```
    pub fn iter(&self) -> SnapshotIter<'_, K, V, T> {
        SnapshotIter::new(&self.table)
    }

    /// The underlying table.
    pub fn as_table(&self) -> &T {
        &self.table
    }

    /// Check if two snapshots captured the same table instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.table, &b.table)
    }
}

impl<K, V, T> Clone for Snapshot<K, V, T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            _entries: PhantomData,
        }
    }
}

impl<'a, K, V, T> IntoIterator for &'a Snapshot<K, V, T>
where
    T: Table<K, V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = SnapshotIter<'a, K, V, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, T> std::fmt::Debug for Snapshot<K, V, T>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
    T: Table<K, V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
