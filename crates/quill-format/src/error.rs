use thiserror::Error;

/// An output stage failed.
///
/// Processing a document never fails by itself; the only failure is the
/// output sink refusing a write or a flush.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The sink reported an I/O error.
    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}

/// Result alias for output stages.
pub type Result<T, E = FormatError> = core::result::Result<T, E>;
