//! Error types for loading models.

use std::path::PathBuf;

use md3_decode::DecodeError;
use thiserror::Error;

/// Result alias for loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching or decoding a model.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be performed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: u16,
    },

    /// A local file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fetched bytes are not a decodable model.
    #[error("failed to decode model: {0}")]
    Decode(#[from] DecodeError),

    /// The locator needs a transport this target does not have.
    #[error("cannot fetch {url} on this target")]
    UnsupportedLocator {
        url: String,
    },

    /// A reload was requested before any source was set.
    #[error("model has no source to reload")]
    NoSource,
}
