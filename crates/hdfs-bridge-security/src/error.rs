//! Error types for the security context.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while resolving the current user or its credentials.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// No user name could be determined for the current process.
    #[error("no current user could be resolved")]
    NoCurrentUser,
    /// The token storage file could not be read.
    #[error("failed to read token file {}: {source}", path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Token storage bytes are malformed.
    #[error("invalid token storage: {0}")]
    InvalidTokenStorage(String),
    /// Reading or writing credential bytes failed.
    #[error("credential i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
