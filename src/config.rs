use crate::error::Error;
use crate::hash::DefaultTable;
use crate::table::Table;

/// Configuration for a GrowableMap instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) load_factor: f64,
    pub(crate) initial_buckets: usize,
    pub(crate) max_retries: usize,
}

impl Config {
    /// Create a new config with defaults (load factor 0.75, 16 buckets).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the load factor that triggers a resize. Must be finite and greater than 0.
    pub fn load_factor(mut self, load_factor: f64) -> Result<Self, Error> {
        if !load_factor.is_finite() || load_factor <= 0.0 {
            return Err(Error::InvalidLoadFactor);
        }
        self.load_factor = load_factor;
        Ok(self)
    }

    /// Set the number of buckets both tables start with. Must be greater than 0.
    ///
    /// The built-in tables round this up to a power of two, so the map
    /// starts with at least this many buckets.
    pub fn initial_buckets(mut self, buckets: usize) -> Result<Self, Error> {
        if buckets == 0 {
            return Err(Error::InvalidBucketCount);
        }
        self.initial_buckets = buckets;
        Ok(self)
    }

    /// Set how many times an insert may find a resize already done by
    /// another thread before it gives up with [`Error::RetriesExhausted`].
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(Error::InvalidLoadFactor);
        }
        if self.initial_buckets == 0 {
            return Err(Error::InvalidBucketCount);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_factor: 0.75,
            initial_buckets: 16,
            max_retries: 1024,
        }
    }
}

/// Builder for creating a GrowableMap with custom configuration.
///
/// # Example
///
/// ```rust
/// use growmap::GrowableMapBuilder;
///
/// let map = GrowableMapBuilder::new()
///     .load_factor(0.5)?
///     .initial_buckets(64)?
///     .build::<String, i32>()?;
///
/// map.insert("answer".to_string(), 42)?;
/// assert_eq!(map.get(&"answer".to_string()), Some(42));
/// # Ok::<(), growmap::Error>(())
/// ```
pub struct GrowableMapBuilder {
    config: Config,
}

impl GrowableMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the load factor that triggers a resize.
    pub fn load_factor(mut self, load_factor: f64) -> Result<Self, Error> {
        self.config = self.config.load_factor(load_factor)?;
        Ok(self)
    }

    /// Set the number of buckets both tables start with.
    pub fn initial_buckets(mut self, buckets: usize) -> Result<Self, Error> {
        self.config = self.config.initial_buckets(buckets)?;
        Ok(self)
    }

    /// Set the retry limit for inserts that lose the resize race.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.config = self.config.max_retries(retries);
        self
    }

    /// Build a GrowableMap backed by the default table.
    pub fn build<K, V>(self) -> Result<crate::GrowableMap<K, V>, Error>
    where
        DefaultTable<K, V>: Table<K, V>,
    {
        crate::GrowableMap::with_config(self.config)
    }

    /// Build a GrowableMap backed by a caller-chosen table type.
    pub fn build_with_table<K, V, T>(self) -> Result<crate::GrowableMap<K, V, T>, Error>
    where
        T: Table<K, V>,
    {
        crate::GrowableMap::with_config(self.config)
    }
}

impl Default for GrowableMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
