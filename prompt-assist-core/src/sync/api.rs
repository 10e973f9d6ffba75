//! Remote document API seam.

use async_trait::async_trait;

use crate::document_id::DocumentId;

/// Conventional name of the file holding the favorites list.
pub const FAVORITES_BLOB: &str = "favorites.json";

/// A named text file inside a remote document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBlob {
    pub name: String,
    pub content: String,
}

impl RemoteBlob {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A remote document and its files, in the order the service lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    pub id: String,
    pub blobs: Vec<RemoteBlob>,
}

impl RemoteDocument {
    pub fn new(id: impl Into<String>, blobs: Vec<RemoteBlob>) -> Self {
        Self {
            id: id.into(),
            blobs,
        }
    }

    pub fn blob(&self, name: &str) -> Option<&RemoteBlob> {
        self.blobs.iter().find(|b| b.name == name)
    }

    /// The file holding favorites: [`FAVORITES_BLOB`] if present, else the
    /// first file.
    pub fn favorites_blob(&self) -> Option<&RemoteBlob> {
        self.blob(FAVORITES_BLOB).or_else(|| self.blobs.first())
    }
}

/// Failure reported by the remote document API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status, if a response was received at all.
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// An error where no HTTP response was received.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::new(None, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Read and write access to remote documents.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Fetches a document's metadata and file contents. No credential needed.
    async fn fetch_document(&self, id: &DocumentId) -> Result<RemoteDocument, ApiError>;

    /// Replaces the entire content of one named file.
    async fn update_blob(
        &self,
        id: &DocumentId,
        name: &str,
        content: &str,
        credential: &str,
    ) -> Result<(), ApiError>;
}
