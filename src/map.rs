use crate::config::Config;
use crate::error::Error;
use crate::hash::DefaultTable;
use crate::slot::{make_scratch, make_unique, Slot};
use crate::snapshot::Snapshot;
use crate::stats::{MapStats, Stats};
use crate::table::Table;
use parking_lot::{Mutex, MutexGuard, RwLockUpgradableReadGuard};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
#[cfg(feature = "lock-timing")]
use std::time::Instant;

/// Concurrent growable map with snapshot reads.
///
/// Entries live in a single table ("current"). Inserts go straight into it
/// while the map is under its load factor. Once the threshold is reached a
/// single writer copies "current" into a second, larger table ("previous"),
/// adds its entry there, and swaps the two. Readers take a [`Snapshot`] of
/// "current" that is never mutated underneath them.
///
/// The map is lock-minimized, not lock-free: the fast path holds the
/// current table's write lock for one insert, and resizes are serialized
/// behind a mutex.
///
/// # Example
///
/// ```rust
/// use growmap::GrowableMap;
///
/// let map = GrowableMap::new(0.75)?;
/// map.insert(123_i64, (456_i64, "789".to_string()))?;
/// map.insert(456_i64, (456_i64, "789".to_string()))?;
///
/// let snapshot = map.share();
/// assert_eq!(snapshot.len(), 2);
/// assert_eq!(snapshot.get(&123).map(|v| v.0), Some(456));
/// # Ok::<(), growmap::Error>(())
/// ```
pub struct GrowableMap<K, V, T = DefaultTable<K, V>> {
    current: Slot<T>,
    // Scratch table for the next resize. Holding this lock is the resize section.
    previous: Mutex<Arc<T>>,
    size: AtomicUsize,
    bucket_count: AtomicUsize,
    load_factor: f64,
    max_retries: usize,
    stats: MapStats,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V> GrowableMap<K, V>
where
    DefaultTable<K, V>: Table<K, V>,
{
    /// Create a new map with the given load factor and default settings.
    ///
    /// Fails with [`Error::InvalidLoadFactor`] if `load_factor` is not
    /// greater than 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use growmap::{Error, GrowableMap};
    ///
    /// assert!(GrowableMap::<u64, u64>::new(0.75).is_ok());
    /// assert_eq!(GrowableMap::<u64, u64>::new(0.0).err(), Some(Error::InvalidLoadFactor));
    /// ```
    pub fn new(load_factor: f64) -> Result<Self, Error> {
        Self::with_config(Config::new().load_factor(load_factor)?)
    }
}

impl<K, V, T> GrowableMap<K, V, T>
where
    T: Table<K, V>,
{
    /// Create a new map with custom config.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;

        let current = T::try_with_buckets(config.initial_buckets)?;
        let previous = T::try_with_buckets(config.initial_buckets)?;
        let bucket_count = current.bucket_count();

        Ok(Self {
            current: Slot::new(current),
            previous: Mutex::new(Arc::new(previous)),
            size: AtomicUsize::new(0),
            bucket_count: AtomicUsize::new(bucket_count),
            load_factor: config.load_factor,
            max_retries: config.max_retries,
            stats: MapStats::new(),
            _entries: PhantomData,
        })
    }

    /// Whether the insert counter has reached the load factor.
    #[inline]
    fn is_full(&self) -> bool {
        let buckets = self.bucket_count.load(Ordering::Acquire);
        if buckets == 0 {
            return true;
        }
        self.size.load(Ordering::Acquire) as f64 / buckets as f64 >= self.load_factor
    }

    /// Bucket count for the next table: doubled until the counter fits under
    /// the load factor again.
    fn grown_bucket_count(&self, buckets: usize) -> usize {
        let size = self.size.load(Ordering::Acquire) as f64;
        let mut target = buckets.max(1).saturating_mul(2);
        while size / target as f64 >= self.load_factor && target < usize::MAX {
            target = target.saturating_mul(2);
        }
        target
    }

    /// Insert a key-value pair, replacing any previous value for the key.
    ///
    /// Every call counts towards [`size`](Self::size), overwrites included.
    /// Once `Ok` is returned, any later [`share`](Self::share) sees the value
    /// until another insert replaces it.
    ///
    /// Fails with [`Error::AllocationFailed`] if a resize cannot allocate its
    /// new table, or [`Error::RetriesExhausted`] if the insert found the
    /// resize already done by another thread more than `max_retries` times.
    ///
    /// # Example
    ///
    /// ```rust
    /// use growmap::GrowableMap;
    ///
    /// let map = GrowableMap::new(0.75)?;
    /// map.insert("key", 1)?;
    /// map.insert("key", 2)?;
    ///
    /// assert_eq!(map.get(&"key"), Some(2));
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.size(), 2);
    /// # Ok::<(), growmap::Error>(())
    /// ```
    pub fn insert(&self, key: K, value: V) -> Result<(), Error> {
        self.size.fetch_add(1, Ordering::AcqRel);

        let mut attempts = 0;
        loop {
            if !self.is_full() {
                let mut current = self.current.write();
                // A resize may have been triggered while we waited.
                if !self.is_full() {
                    make_unique::<K, V, T>(&mut current)?.insert(key, value);
                    self.stats.record_fast_path();
                    return Ok(());
                }
            }

            let mut previous = self.lock_previous();
            if self.is_full() {
                return self.resize(&mut previous, key, value);
            }
            drop(previous);

            // Someone else grew the table while we waited for the lock.
            attempts += 1;
            self.stats.record_retry();
            if attempts > self.max_retries {
                return Err(Error::RetriesExhausted { attempts });
            }
            std::thread::yield_now();
        }
    }

    /// Acquire the resize section.
    fn lock_previous(&self) -> MutexGuard<'_, Arc<T>> {
        #[cfg(feature = "lock-timing")]
        let start = Instant::now();

        let guard = self.previous.lock();

        #[cfg(feature = "lock-timing")]
        self.stats.record_lock_wait(start.elapsed().as_nanos() as u64);
        self.stats.record_lock_acquisition();
        guard
    }

    /// Copy "current" into `previous` with more buckets, add the entry and
    /// swap the two. Must be called with the resize section held.
    ///
    /// The copy is taken under an upgradable read, so snapshots can still
    /// be taken while it runs but no fast-path write can land in "current"
    /// and miss the copy.
    fn resize(&self, previous: &mut Arc<T>, key: K, value: V) -> Result<(), Error> {
        let current = self.current.upgradable_read();
        let buckets = self.grown_bucket_count(current.bucket_count());

        let staged = make_scratch::<K, V, T>(previous);
        staged.try_refill(&current, buckets)?;
        staged.insert(key, value);
        let grown = staged.bucket_count();

        let mut current = RwLockUpgradableReadGuard::upgrade(current);
        std::mem::swap(&mut *current, previous);
        self.bucket_count.store(grown, Ordering::Release);
        self.stats.record_resize();
        Ok(())
    }

    /// Take a read-only snapshot of the current table.
    ///
    /// The snapshot never changes, even if inserts or resizes happen after
    /// it was taken. It may be stale as soon as it is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use growmap::GrowableMap;
    ///
    /// let map = GrowableMap::new(0.75)?;
    /// map.insert(1, "one")?;
    ///
    /// let before = map.share();
    /// map.insert(2, "two")?;
    ///
    /// assert_eq!(before.len(), 1);
    /// assert_eq!(map.share().len(), 2);
    /// # Ok::<(), growmap::Error>(())
    /// ```
    pub fn share(&self) -> Snapshot<K, V, T> {
        Snapshot::new(self.current.load())
    }

    /// Get a clone of the value stored for `key`.
    ///
    /// Unlike [`share`](Self::share), this does not keep the table alive
    /// afterwards, so it never forces the next write to copy.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.current.read().get(key).cloned()
    }

    /// Check if `key` is present in the current table.
    pub fn contains_key(&self, key: &K) -> bool {
        self.current.read().get(key).is_some()
    }

    /// Number of distinct entries in the current table.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }

    /// Number of insert calls made so far, overwrites included.
    ///
    /// This is the counter the growth trigger compares against the bucket
    /// count, not the number of distinct keys (see [`len`](Self::len)).
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    /// Bucket count of the current table as of the last resize.
    pub fn bucket_count(&self) -> usize {
        self.bucket_count.load(Ordering::Acquire)
    }

    /// The configured load factor.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Get statistics about the map and its insert path.
    pub fn stats(&self) -> Stats {
        Stats {
            size: self.size(),
            len: self.len(),
            bucket_count: self.bucket_count(),
            load_factor: self.load_factor,
            ops: self.stats.snapshot(),
        }
    }
}

impl<K, V, T> std::fmt::Debug for GrowableMap<K, V, T>
where
    T: Table<K, V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrowableMap")
            .field("size", &self.size())
            .field("len", &self.len())
            .field("bucket_count", &self.bucket_count())
            .field("load_factor", &self.load_factor)
            .finish()
    }
}
