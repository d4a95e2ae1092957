//! Errors from decoding and loading provider collections.
//!
//! Matching never fails; only the wire and file boundaries do.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An entry's provider did not decode: unknown or missing `type`, a
    /// non-object entry, or a missing or non-object `set`.
    #[error("invalid rootfs provider for scheme '{scheme}': {source}")]
    InvalidProvider {
        scheme: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document is not JSON, or not an object keyed by scheme.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read rootfs providers from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The scheme whose entry failed to decode, if the failure was in an entry.
    pub fn scheme(&self) -> Option<&str> {
        match self {
            Error::InvalidProvider { scheme, .. } => Some(scheme),
            _ => None,
        }
    }
}
