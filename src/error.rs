use thiserror::Error;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// A point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Index of the offending point.
        index: usize,
    },

    /// A ping record could not be turned into a location.
    #[error("record on line {line}: {message}")]
    Record {
        /// 1-based line number in the source.
        line: u64,
        /// Human-readable explanation.
        message: String,
    },

    /// CSV encoding or decoding failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// I/O failure while reading or writing records.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error rejects the caller's input (as opposed to an I/O failure).
    ///
    /// Clustering never retries these; they are surfaced as-is.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput
                | Error::InvalidParameter { .. }
                | Error::InvalidClusterCount { .. }
                | Error::NonFinitePoint { .. }
                | Error::Record { .. }
        )
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
