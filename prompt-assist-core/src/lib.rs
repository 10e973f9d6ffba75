//! Prompt Assist Core Library
//!
//! Local storage for favorites, clipboard history and presets, plus
//! synchronization of favorites against a shared gist.

pub mod document_id;
pub mod merge;
pub mod models;
pub mod notify;
pub mod storage;
pub mod store;
pub mod sync;

pub use document_id::{DocumentId, DocumentIdError};
pub use merge::merge;
pub use models::{HistoryEntry, Preset, SyncConfig, MAX_HISTORY};
pub use notify::{Notification, NotificationSink, RecordingSink, TracingSink};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::LocalStore;
pub use sync::{
    ApiError, DocumentApi, GistApi, PullResult, PushResult, RemoteBlob, RemoteDocument,
    RemoteSyncClient, SyncError, DEFAULT_API_URL, FAVORITES_BLOB,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
