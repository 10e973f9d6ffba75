//! Pull/push client bridging the local favorites and a remote document.

use tracing::{debug, info, warn};

use super::api::{DocumentApi, FAVORITES_BLOB};
use super::error::SyncError;
use crate::document_id::DocumentId;
use crate::merge::merge;
use crate::notify::NotificationSink;
use crate::storage::KeyValueStore;
use crate::store::LocalStore;

/// Result of a successful pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullResult {
    pub document_id: DocumentId,
    /// The merged favorites, as now persisted locally
    pub favorites: Vec<String>,
    /// Number of entries that came from the remote
    pub added: usize,
}

/// Result of a successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResult {
    pub document_id: DocumentId,
    /// Name of the remote file that was overwritten
    pub blob_name: String,
    /// Number of favorites written
    pub count: usize,
}

/// Synchronizes a [`LocalStore`]'s favorites with one remote document.
pub struct RemoteSyncClient<A> {
    api: A,
}

impl<A: DocumentApi> RemoteSyncClient<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches the remote favorites and merges them into the local ones.
    ///
    /// `document_ref` overrides the cached reference when given. The outcome
    /// is reported to the store's notification sink either way.
    pub async fn pull<S, N>(
        &self,
        store: &mut LocalStore<S, N>,
        document_ref: Option<&str>,
    ) -> Result<PullResult, SyncError>
    where
        S: KeyValueStore,
        N: NotificationSink,
    {
        let result = self.try_pull(store, document_ref).await;

        match &result {
            Ok(pulled) => {
                info!(
                    "Pulled gist {}: {} favorites, {} new",
                    pulled.document_id,
                    pulled.favorites.len(),
                    pulled.added
                );
                store.notify(
                    &format!(
                        "Pulled favorites from gist ({} new, {} total).",
                        pulled.added,
                        pulled.favorites.len()
                    ),
                    false,
                );
            }
            Err(e) => {
                warn!("Pull failed: {}", e);
                store.notify(&format!("Pull failed: {}", e), true);
            }
        }

        result
    }

    /// Overwrites the remote favorites file with the local favorites.
    ///
    /// `document_ref` and `credential` override the cached values when given.
    /// No request is made if either is missing.
    pub async fn push<S, N>(
        &self,
        store: &mut LocalStore<S, N>,
        document_ref: Option<&str>,
        credential: Option<&str>,
    ) -> Result<PushResult, SyncError>
    where
        S: KeyValueStore,
        N: NotificationSink,
    {
        let result = self.try_push(store, document_ref, credential).await;

        match &result {
            Ok(pushed) => {
                info!(
                    "Pushed {} favorites to gist {} ({})",
                    pushed.count, pushed.document_id, pushed.blob_name
                );
                store.notify(
                    &format!(
                        "Pushed {} favorites to gist file {}.",
                        pushed.count, pushed.blob_name
                    ),
                    false,
                );
            }
            Err(e) => {
                warn!("Push failed: {}", e);
                store.notify(&format!("Push failed: {}", e), true);
            }
        }

        result
    }

    async fn try_pull<S, N>(
        &self,
        store: &mut LocalStore<S, N>,
        document_ref: Option<&str>,
    ) -> Result<PullResult, SyncError>
    where
        S: KeyValueStore,
        N: NotificationSink,
    {
        let reference = pick(document_ref, store.sync_config().document_ref).unwrap_or_default();
        let document_id = DocumentId::resolve(&reference)
            .map_err(|_| SyncError::InvalidReference(reference.clone()))?;

        debug!("Fetching gist {}", document_id);
        let document = self
            .api
            .fetch_document(&document_id)
            .await
            .map_err(SyncError::RemoteUnavailable)?;

        let blob = document.favorites_blob().ok_or(SyncError::NoContent)?;
        let mut remote: Vec<String> = serde_json::from_str(&blob.content)
            .map_err(|e| SyncError::MalformedContent(format!("{}: {}", blob.name, e)))?;
        // Favorites are never blank, whatever the remote holds
        remote.retain(|entry| !entry.trim().is_empty());

        let local = store.favorites();
        let favorites = merge(&remote, &local);
        let added = favorites.len() - local.len();
        if !store.replace_favorites(&favorites) {
            return Err(SyncError::LocalSaveFailed);
        }

        Ok(PullResult {
            document_id,
            favorites,
            added,
        })
    }

    async fn try_push<S, N>(
        &self,
        store: &mut LocalStore<S, N>,
        document_ref: Option<&str>,
        credential: Option<&str>,
    ) -> Result<PushResult, SyncError>
    where
        S: KeyValueStore,
        N: NotificationSink,
    {
        let cached = store.sync_config();
        let document_id = pick(document_ref, cached.document_ref)
            .and_then(|reference| DocumentId::resolve(&reference).ok())
            .ok_or(SyncError::MissingReference)?;
        let credential = pick(credential, cached.credential).ok_or(SyncError::MissingCredential)?;

        debug!("Fetching gist {} before push", document_id);
        let document = self
            .api
            .fetch_document(&document_id)
            .await
            .map_err(SyncError::RemoteUnavailable)?;

        let blob_name = document
            .favorites_blob()
            .map(|blob| blob.name.clone())
            .unwrap_or_else(|| FAVORITES_BLOB.to_string());

        let favorites = store.favorites();
        let content = serde_json::to_string_pretty(&favorites)
            .map_err(|e| SyncError::MalformedContent(e.to_string()))?;

        self.api
            .update_blob(&document_id, &blob_name, &content, &credential)
            .await
            .map_err(SyncError::RemoteRejected)?;

        Ok(PushResult {
            document_id,
            blob_name,
            count: favorites.len(),
        })
    }
}

/// Takes the explicit value if non-blank, else the cached one.
fn pick(explicit: Option<&str>, cached: Option<String>) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or(cached)
}
