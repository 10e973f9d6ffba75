//! Favorites synchronization against a shared gist.
//!
//! ## Protocol
//!
//! - **pull**: fetch the gist, take the favorites file (the conventionally
//!   named one, else the first file), parse it as a JSON array of strings,
//!   merge it into the local favorites and save the result.
//! - **push**: fetch the gist to learn the existing file name, then replace
//!   that file's content with the local favorites. Requires a write token.
//!
//! Neither operation touches local state when it fails.

mod api;
mod client;
mod error;
mod gist;

pub use api::{ApiError, DocumentApi, RemoteBlob, RemoteDocument, FAVORITES_BLOB};
pub use client::{PullResult, PushResult, RemoteSyncClient};
pub use error::SyncError;
pub use gist::{GistApi, DEFAULT_API_URL};
