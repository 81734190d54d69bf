use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in the `linkswap` application.
///
/// Everything here is fatal to a run. Per-file problems are reported through
/// [`crate::replacer::FileOutcome`] instead and never surface as an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One of the two link lists does not exist.
    #[error("File not found: {}", path.display())]
    ListNotFound { path: PathBuf },

    /// One of the two link lists exists but could not be read as text.
    #[error("Could not read {}: {source}", path.display())]
    ListRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The lists have different lengths and nobody was around to confirm.
    #[error(
        "link lists have different lengths ({originals} vs {replacements}) and no confirmation is available"
    )]
    MismatchUnconfirmed {
        originals: usize,
        replacements: usize,
    },

    /// An error that occurred while parsing a YAML configuration file.
    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),

    /// An error from the `ignore` crate, which is used for directory traversal.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// An error related to JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, linkswap::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}
