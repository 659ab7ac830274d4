//! Error types for proxymesh

use thiserror::Error;

/// Main error type for proxymesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{element} index {index} is out of range (count is {count})")]
    IndexOutOfRange {
        element: &'static str,
        index: u32,
        count: u32,
    },

    #[error("Dimension mismatch: {left} vs {right} components")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Inconsistent indexing: {0}")]
    InconsistentIndexing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    pub(crate) fn facet_out_of_range(index: u32, count: u32) -> Self {
        Error::IndexOutOfRange { element: "facet", index, count }
    }

    pub(crate) fn vertex_out_of_range(index: u32, count: u32) -> Self {
        Error::IndexOutOfRange { element: "vertex", index, count }
    }
}

/// Result type alias for proxymesh operations
pub type Result<T> = std::result::Result<T, Error>;
