/// Errors that can occur when building or writing to a GrowableMap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The load factor is invalid (must be finite and greater than 0).
    InvalidLoadFactor,
    /// The initial bucket count is invalid (must be greater than 0).
    InvalidBucketCount,
    /// The underlying table could not allocate room for a resize.
    AllocationFailed {
        /// Bucket count the table was asked to hold.
        buckets: usize,
    },
    /// An insert kept losing the resize race and gave up.
    RetriesExhausted {
        /// Number of attempts made before giving up.
        attempts: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidLoadFactor => {
                write!(f, "load factor must be finite and greater than 0")
            }
            Error::InvalidBucketCount => write!(f, "initial bucket count must be greater than 0"),
            Error::AllocationFailed { buckets } => {
                write!(f, "failed to allocate a table with {} buckets", buckets)
            }
            Error::RetriesExhausted { attempts } => {
                write!(f, "insert gave up after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for Error {}
