use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by every crate in the workspace.
///
/// `Domain` covers bad input data (malformed rows, duplicates, out of range
/// values, unknown names) and carries a message that includes the file name
/// and row number when one is available. `Range` covers out of range numeric
/// conversions, which indicate a programming mistake rather than bad data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Domain(String),

    #[error("range error: {0}")]
    Range(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn domain(msg: impl Into<String>) -> Self {
        Error::Domain(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Error::Range(msg.into())
    }

    /// Returns `true` for the `Domain` variant
    pub fn is_domain(&self) -> bool {
        matches!(self, Error::Domain(_))
    }

    /// Returns `true` for the `Range` variant
    pub fn is_range(&self) -> bool {
        matches!(self, Error::Range(_))
    }
}
