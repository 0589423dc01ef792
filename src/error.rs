//! Error types for the update decision core.

/// Top-level error type for the update decision core.
///
/// Every failure originates at a boundary (version construction, catalog
/// fetch, preference persistence, alert display). Decision computation itself
/// is total and cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum LookoutError {
    /// Malformed version string, rejected at construction.
    #[error("version parse error: {0}")]
    Parse(String),

    /// Catalog lookup transport or decode failure.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Preference persistence failure.
    #[error("store error: {0}")]
    Store(String),

    /// Display collaborator unavailable, or a choice outside the offered set.
    #[error("presentation error: {0}")]
    Presentation(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, LookoutError>;
