//! Statistics and diagnostics types.

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Insert-path operation counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOps {
    /// Inserts that went straight into the current table.
    pub fast_path: u64,
    /// Resizes performed (each one also carries one insert).
    pub resizes: u64,
    /// Times an insert found the resize already done by another thread.
    pub retries: u64,
    /// Acquisitions of the resize lock (0 when metrics feature disabled).
    pub lock_acquisitions: u64,
    /// Cumulative resize lock wait time in nanoseconds (0 when lock-timing disabled).
    pub lock_wait_nanos: u64,
}

/// Thread-safe insert-path statistics tracker.
#[cfg(feature = "metrics")]
pub(crate) struct MapStats {
    fast_path: AtomicU64,
    resizes: AtomicU64,
    retries: AtomicU64,
    lock_acquisitions: AtomicU64,
    #[cfg(feature = "lock-timing")]
    lock_wait_nanos: AtomicU64,
}

#[cfg(feature = "metrics")]
impl MapStats {
    pub fn new() -> Self {
        Self {
            fast_path: AtomicU64::new(0),
            resizes: AtomicU64::new(0),
            retries: AtomicU64::new(0),
            lock_acquisitions: AtomicU64::new(0),
            #[cfg(feature = "lock-timing")]
            lock_wait_nanos: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_fast_path(&self) {
        self.fast_path.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_resize(&self) {
        self.resizes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lock_acquisition(&self) {
        self.lock_acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    #[cfg(feature = "lock-timing")]
    #[inline]
    pub fn record_lock_wait(&self, nanos: u64) {
        self.lock_wait_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> InsertOps {
        InsertOps {
            fast_path: self.fast_path.load(Ordering::Relaxed),
            resizes: self.resizes.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            lock_acquisitions: self.lock_acquisitions.load(Ordering::Relaxed),
            #[cfg(feature = "lock-timing")]
            lock_wait_nanos: self.lock_wait_nanos.load(Ordering::Relaxed),
            #[cfg(not(feature = "lock-timing"))]
            lock_wait_nanos: 0,
        }
    }
}

#[cfg(feature = "metrics")]
impl Default for MapStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-sized placeholder when metrics are disabled.
#[cfg(not(feature = "metrics"))]
pub(crate) struct MapStats;

#[cfg(not(feature = "metrics"))]
impl MapStats {
    pub fn new() -> Self {
        MapStats
    }

    #[inline]
    pub fn record_fast_path(&self) {}

    #[inline]
    pub fn record_resize(&self) {}

    #[inline]
    pub fn record_retry(&self) {}

    #[inline]
    pub fn record_lock_acquisition(&self) {}

    #[cfg(feature = "lock-timing")]
    #[inline]
    pub fn record_lock_wait(&self, _nanos: u64) {}

    pub fn snapshot(&self) -> InsertOps {
        InsertOps::default()
    }
}

#[cfg(not(feature = "metrics"))]
impl Default for MapStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time statistics for a GrowableMap instance.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Number of insert calls made, overwrites included.
    pub size: usize,
    /// Number of distinct entries in the current table.
    pub len: usize,
    /// Cached bucket count of the current table.
    pub bucket_count: usize,
    /// Configured load factor.
    pub load_factor: f64,
    /// Insert-path counters (all 0 when metrics disabled).
    pub ops: InsertOps,
}

impl Stats {
    /// Ratio of insert calls to buckets, the value compared against the load factor.
    pub fn fill_ratio(&self) -> f64 {
        if self.bucket_count == 0 {
            return f64::INFINITY;
        }
        self.size as f64 / self.bucket_count as f64
    }
}
