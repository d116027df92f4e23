//! Dataset error types.

use std::path::PathBuf;

/// Errors raised while loading a GeoJSON dataset or rebuilding a filtered one.
///
/// Everything except [`DatasetError::Serialization`] happens at load time and
/// is fatal for startup.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The source file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document root is not an object, or has no `features` array
    #[error("malformed GeoJSON document: {message}")]
    MalformedDocument { message: String },

    /// One element of the `features` array could not be decoded
    #[error("malformed feature at index {index}: {source}")]
    MalformedFeature {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A loaded feature could not be encoded again
    #[error("failed to serialize filtered dataset: {0}")]
    Serialization(#[source] serde_json::Error),
}
