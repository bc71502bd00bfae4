//! # GrowMap
//!
//! A concurrent growable map that keeps reads and writes cheap and pushes
//! the expensive resize behind a single exclusive section.
//!
//! Entries live in one "current" table. Writers insert straight into it
//! while the map is under its load factor. When the threshold is reached,
//! one writer copies the table into a larger scratch table, adds its entry,
//! and swaps the two, while every other writer waits or retries. Readers
//! take an `Arc`-backed snapshot that never changes underneath them.
//!
//! ## Features
//!
//! - **Snapshot Reads**: `share()` hands out an immutable, shared table
//! - **Serialized Growth**: One resize at a time, double-checked under a lock
//! - **No Lost Writes**: Fast-path inserts cannot slip past a resize copy
//! - **Pluggable Tables**: hashbrown, std `HashMap`, or any [`Table`] impl
//! - **Statistics**: Insert-path counters behind the `metrics` feature
//!
//! ## Example
//!
//! ```rust
//! use growmap::GrowableMap;
//!
//! let map = GrowableMap::new(0.75)?;
//!
//! // Insert values
//! map.insert("key1", "value1")?;
//! map.insert("key2", "value2")?;
//!
//! // Read values
//! assert_eq!(map.get(&"key1"), Some("value1"));
//!
//! // Iterate over a point-in-time snapshot
//! let snapshot = map.share();
//! for (key, value) in &snapshot {
//!     println!("{}: {}", key, value);
//! }
//!
//! // Get statistics
//! let stats = map.stats();
//! println!("Inserts: {}, buckets: {}", stats.size, stats.bucket_count);
//! # Ok::<(), growmap::Error>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use growmap::{GrowableMapBuilder, StdTable};
//!
//! let map = GrowableMapBuilder::new()
//!     .load_factor(0.5)?
//!     .initial_buckets(256)?
//!     .max_retries(64)
//!     .build_with_table::<String, i32, StdTable<String, i32>>()?;
//! # Ok::<(), growmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Table types for each supported hash function.
pub mod hash;
/// Iterator implementations.
pub mod iter;
/// Main GrowableMap implementation.
pub mod map;
/// Shared table slots.
mod slot;
/// Read-only snapshot handles.
pub mod snapshot;
/// Statistics and metrics collection.
pub mod stats;
/// The underlying table abstraction.
pub mod table;

// Re-export main types
pub use config::{Config, GrowableMapBuilder};
pub use error::Error;
#[cfg(feature = "fxhash")]
pub use hash::FxTable;
pub use hash::{DefaultTable, StdTable};
pub use map::GrowableMap;
pub use snapshot::Snapshot;
pub use stats::{InsertOps, Stats};
pub use table::Table;
