//! Ready-made table types, one per supported hash function.

/// Default table: hashbrown with ahash (fast and well-distributed).
pub type DefaultTable<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

/// Table using fxhash (faster but potentially less distributed).
#[cfg(feature = "fxhash")]
pub type FxTable<K, V> = hashbrown::HashMap<K, V, fxhash::FxBuildHasher>;

/// Table backed by the standard library's `HashMap` and its SipHash hasher.
pub type StdTable<K, V> = std::collections::HashMap<K, V>;
