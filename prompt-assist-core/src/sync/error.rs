//! Sync error types.

use thiserror::Error;

use super::api::ApiError;

/// Errors that can occur during pull and push.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// No document id could be extracted from the reference
    #[error("Could not resolve a gist id from {0:?}")]
    InvalidReference(String),

    /// No usable document reference was given or cached
    #[error("No gist configured. Set a gist URL or id first.")]
    MissingReference,

    /// No write token was given or cached
    #[error("A GitHub token is required to push favorites.")]
    MissingCredential,

    /// Fetching the remote document failed
    #[error("Could not fetch gist: {0}")]
    RemoteUnavailable(ApiError),

    /// The remote refused the update
    #[error("Gist update rejected: {0}")]
    RemoteRejected(ApiError),

    /// The remote document holds no files
    #[error("Gist has no files.")]
    NoContent,

    /// The favorites file is not a JSON array of strings
    #[error("Gist content is not a list of snippets: {0}")]
    MalformedContent(String),

    /// The merged favorites could not be saved locally
    #[error("Pulled favorites could not be saved locally.")]
    LocalSaveFailed,
}

impl SyncError {
    /// HTTP status for remote failures, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::RemoteUnavailable(e) | SyncError::RemoteRejected(e) => e.status,
            _ => None,
        }
    }
}
