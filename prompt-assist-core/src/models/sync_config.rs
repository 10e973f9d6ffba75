use serde::Serialize;

/// Cached reference to the shared favorites document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncConfig {
    /// Gist URL or bare id as entered by the user.
    pub document_ref: Option<String>,
    /// Write token for the gist.
    #[serde(skip_serializing)]
    pub credential: Option<String>,
}

impl SyncConfig {
    /// Returns true if both a document reference and a credential are cached.
    pub fn can_push(&self) -> bool {
        self.document_ref.is_some() && self.credential.is_some()
    }
}
