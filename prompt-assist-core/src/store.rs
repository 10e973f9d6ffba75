//! Local store for favorites, clipboard history, presets and sync settings.
//!
//! All collections are kept as JSON under fixed keys in a [`KeyValueStore`].
//! Reads of missing or unreadable values fall back to an empty collection;
//! write failures are logged and reported to the notification sink, never
//! returned to the caller. A mutation whose write failed reports no change
//! and sends no success message.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{HistoryEntry, Preset, SyncConfig, MAX_HISTORY};
use crate::notify::NotificationSink;
use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "pa_favorites";
pub const HISTORY_KEY: &str = "pa_clip_history";
pub const PRESETS_KEY: &str = "pa_presets";
pub const SYNC_REF_KEY: &str = "pa_sync_ref";
pub const SYNC_TOKEN_KEY: &str = "pa_sync_token";

/// Owner of every locally persisted collection.
pub struct LocalStore<S, N> {
    storage: S,
    sink: N,
}

impl<S: KeyValueStore, N: NotificationSink> LocalStore<S, N> {
    pub fn new(storage: S, sink: N) -> Self {
        Self { storage, sink }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Sends a user-visible message to the notification sink.
    pub fn notify(&self, message: &str, is_error: bool) {
        self.sink.notify(message, is_error);
    }

    // Favorites

    /// Returns the favorites, most recently added first.
    pub fn favorites(&self) -> Vec<String> {
        self.read_json(FAVORITES_KEY).unwrap_or_default()
    }

    /// Adds a favorite at the front.
    ///
    /// Blank text and text already present are ignored. Returns whether the
    /// collection changed.
    pub fn add_favorite(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let mut list = self.favorites();
        if list.iter().any(|existing| existing == text) {
            debug!("Favorite already present, skipping");
            return false;
        }

        list.insert(0, text.to_string());
        if !self.write_json(FAVORITES_KEY, &list) {
            return false;
        }
        self.notify("Favorite added.", false);
        true
    }

    /// Removes the favorite at `index`, returning it. Out of range is a no-op.
    pub fn remove_favorite(&mut self, index: usize) -> Option<String> {
        let mut list = self.favorites();
        if index >= list.len() {
            return None;
        }

        let removed = list.remove(index);
        if !self.write_json(FAVORITES_KEY, &list) {
            return None;
        }
        self.notify(&format!("Favorite removed: {}", removed), false);
        Some(removed)
    }

    /// Overwrites the whole favorites collection. Returns whether it was saved.
    pub fn replace_favorites(&mut self, favorites: &[String]) -> bool {
        self.write_json(FAVORITES_KEY, favorites)
    }

    // Clipboard history

    /// Returns the clipboard history, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.read_json(HISTORY_KEY).unwrap_or_default()
    }

    /// Records a copied string at the front of the history.
    ///
    /// Skipped if `text` is empty or equal to the current front entry; only
    /// the front entry is compared. The history is capped at
    /// [`MAX_HISTORY`], dropping the oldest entries.
    pub fn add_history_entry(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let mut list = self.history();
        let mut entry = HistoryEntry::new(text);
        if let Some(front) = list.first() {
            if front.text == text {
                return false;
            }
            // Keep timestamps non-decreasing even if the clock stepped back
            entry.timestamp = entry.timestamp.max(front.timestamp);
        }

        list.insert(0, entry);
        list.truncate(MAX_HISTORY);
        self.write_json(HISTORY_KEY, &list)
    }

    /// Removes the history entry at `index`. Out of range is a no-op.
    pub fn remove_history_entry(&mut self, index: usize) -> Option<HistoryEntry> {
        let mut list = self.history();
        if index >= list.len() {
            return None;
        }

        let removed = list.remove(index);
        self.write_json(HISTORY_KEY, &list).then_some(removed)
    }

    /// Deletes the whole clipboard history.
    pub fn clear_history(&mut self) {
        if self.remove_key(HISTORY_KEY) {
            self.notify("History cleared.", false);
        }
    }

    // Presets

    /// Returns all presets in the order they were saved.
    pub fn presets(&self) -> Vec<Preset> {
        self.read_json(PRESETS_KEY).unwrap_or_default()
    }

    /// Appends a preset. Ignored if `name` is blank.
    pub fn save_preset(&mut self, name: &str, prompt_text: &str, negative_text: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }

        let mut list = self.presets();
        list.push(Preset::new(name, prompt_text, negative_text));
        if !self.write_json(PRESETS_KEY, &list) {
            return false;
        }
        self.notify(&format!("Preset saved: {}", name), false);
        true
    }

    /// Returns the preset at `index`, or `None` if there is none.
    pub fn apply_preset(&self, index: usize) -> Option<Preset> {
        let preset = self.presets().into_iter().nth(index)?;
        self.notify(&format!("Preset applied: {}", preset.name), false);
        Some(preset)
    }

    // Sync configuration

    /// Returns the cached document reference and write credential.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            document_ref: self.read_text(SYNC_REF_KEY),
            credential: self.read_text(SYNC_TOKEN_KEY),
        }
    }

    /// Caches the document reference and credential. A blank value clears
    /// the corresponding field.
    pub fn set_sync_config(&mut self, document_ref: &str, credential: &str) {
        self.write_text(SYNC_REF_KEY, document_ref);
        self.write_text(SYNC_TOKEN_KEY, credential);
    }

    // Medium access

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring unreadable value for {}: {}", key, e);
                None
            }
        }
    }

    fn read_text(&self, key: &str) -> Option<String> {
        self.read_raw(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.write_raw(key, &json),
            Err(e) => {
                warn!("Failed to serialize {}: {}", key, e);
                false
            }
        }
    }

    fn write_text(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            self.remove_key(key)
        } else {
            self.write_raw(key, value)
        }
    }

    fn write_raw(&mut self, key: &str, value: &str) -> bool {
        match self.storage.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to write {}: {}", key, e);
                self.notify(&format!("Could not save changes: {}", e), true);
                false
            }
        }
    }

    fn remove_key(&mut self, key: &str) -> bool {
        match self.storage.remove(key) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to remove {}: {}", key, e);
                self.notify(&format!("Could not save changes: {}", e), true);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use crate::storage::{FileStore, MemoryStore, StorageError};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_store() -> (LocalStore<MemoryStore, RecordingSink>, RecordingSink) {
        let sink = RecordingSink::new();
        (LocalStore::new(MemoryStore::new(), sink.clone()), sink)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Medium whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::IoError(
                PathBuf::from(key),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    // Favorites

    #[test]
    fn test_favorites_empty_initially() {
        let (store, _) = test_store();
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_add_favorite_inserts_at_front() {
        let (mut store, sink) = test_store();

        assert!(store.add_favorite("highly detailed"));
        assert!(store.add_favorite("8k"));

        assert_eq!(store.favorites(), strings(&["8k", "highly detailed"]));
        assert_eq!(sink.last().unwrap().message, "Favorite added.");
    }

    #[test]
    fn test_add_favorite_ignores_duplicates_and_blank() {
        let (mut store, sink) = test_store();

        store.add_favorite("bokeh");
        assert!(!store.add_favorite("bokeh"));
        assert!(!store.add_favorite(""));
        assert!(!store.add_favorite("   \t"));

        assert_eq!(store.favorites(), strings(&["bokeh"]));
        assert_eq!(sink.notifications().len(), 1);
    }

    #[test]
    fn test_add_favorite_sequence_has_no_duplicates() {
        let (mut store, _) = test_store();

        for text in ["a", "b", "a", "c", "b", "d", "d"] {
            store.add_favorite(text);
        }

        assert_eq!(store.favorites(), strings(&["d", "c", "b", "a"]));
    }

    #[test]
    fn test_remove_favorite() {
        let (mut store, sink) = test_store();
        store.add_favorite("a");
        store.add_favorite("b");
        store.add_favorite("c");

        assert_eq!(store.remove_favorite(1).as_deref(), Some("b"));
        assert_eq!(store.favorites(), strings(&["c", "a"]));
        assert_eq!(sink.last().unwrap().message, "Favorite removed: b");
    }

    #[test]
    fn test_remove_favorite_out_of_range_is_noop() {
        let (mut store, sink) = test_store();
        store.add_favorite("a");
        let before = sink.notifications().len();

        assert!(store.remove_favorite(1).is_none());
        assert!(store.remove_favorite(usize::MAX).is_none());

        assert_eq!(store.favorites(), strings(&["a"]));
        assert_eq!(sink.notifications().len(), before);
    }

    #[test]
    fn test_corrupt_favorites_read_as_empty() {
        let mut storage = MemoryStore::new();
        storage.set(FAVORITES_KEY, "{not json").unwrap();
        let store = LocalStore::new(storage, RecordingSink::new());

        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_wrong_shape_favorites_read_as_empty() {
        let mut storage = MemoryStore::new();
        storage.set(FAVORITES_KEY, r#"{"a":1}"#).unwrap();
        let mut store = LocalStore::new(storage, RecordingSink::new());

        assert!(store.favorites().is_empty());

        // Adding starts a fresh list
        store.add_favorite("x");
        assert_eq!(store.favorites(), strings(&["x"]));
    }

    #[test]
    fn test_replace_favorites() {
        let (mut store, _) = test_store();
        store.add_favorite("old");

        store.replace_favorites(&strings(&["c", "a", "b"]));
        assert_eq!(store.favorites(), strings(&["c", "a", "b"]));
    }

    // History

    #[test]
    fn test_add_history_entry_newest_first() {
        let (mut store, _) = test_store();

        assert!(store.add_history_entry("first"));
        assert!(store.add_history_entry("second"));

        let history = store.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "second");
        assert_eq!(history[1].text, "first");
        assert!(history[0].timestamp >= history[1].timestamp);
    }

    #[test]
    fn test_add_history_entry_suppresses_adjacent_duplicate() {
        let (mut store, _) = test_store();

        store.add_history_entry("x");
        assert!(!store.add_history_entry("x"));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_add_history_entry_allows_non_adjacent_duplicate() {
        let (mut store, _) = test_store();

        store.add_history_entry("x");
        store.add_history_entry("y");
        assert!(store.add_history_entry("x"));

        let texts: Vec<_> = store.history().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, strings(&["x", "y", "x"]));
    }

    #[test]
    fn test_add_history_entry_ignores_empty() {
        let (mut store, _) = test_store();
        assert!(!store.add_history_entry(""));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_history_capped_dropping_oldest() {
        let (mut store, _) = test_store();

        for i in 0..(MAX_HISTORY + 5) {
            store.add_history_entry(&format!("entry {}", i));
        }

        let history = store.history();
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history[0].text, format!("entry {}", MAX_HISTORY + 4));
        assert_eq!(history[MAX_HISTORY - 1].text, "entry 5");
    }

    #[test]
    fn test_history_timestamp_never_goes_backwards() {
        let mut storage = MemoryStore::new();
        let future = HistoryEntry::new("from the future").with_timestamp(i64::MAX / 2);
        storage
            .set(HISTORY_KEY, &serde_json::to_string(&vec![future]).unwrap())
            .unwrap();
        let mut store = LocalStore::new(storage, RecordingSink::new());

        store.add_history_entry("now");

        let history = store.history();
        assert_eq!(history[0].timestamp, i64::MAX / 2);
    }

    #[test]
    fn test_remove_history_entry() {
        let (mut store, _) = test_store();
        store.add_history_entry("a");
        store.add_history_entry("b");

        assert_eq!(store.remove_history_entry(0).unwrap().text, "b");
        assert!(store.remove_history_entry(5).is_none());
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_clear_history() {
        let (mut store, sink) = test_store();
        store.add_history_entry("a");

        store.clear_history();

        assert!(store.history().is_empty());
        assert!(store.storage().get(HISTORY_KEY).unwrap().is_none());
        assert_eq!(sink.last().unwrap().message, "History cleared.");
    }

    // Presets

    #[test]
    fn test_save_and_apply_preset() {
        let (mut store, sink) = test_store();

        assert!(store.save_preset("portrait", "studio photo", "blurry"));
        assert!(store.save_preset("portrait", "other", ""));

        let presets = store.presets();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].prompt_text, "studio photo");

        let applied = store.apply_preset(1).unwrap();
        assert_eq!(applied.prompt_text, "other");
        assert_eq!(sink.last().unwrap().message, "Preset applied: portrait");
    }

    #[test]
    fn test_save_preset_requires_name() {
        let (mut store, _) = test_store();
        assert!(!store.save_preset("", "p", "n"));
        assert!(!store.save_preset("  ", "p", "n"));
        assert!(store.presets().is_empty());
    }

    #[test]
    fn test_apply_preset_not_found() {
        let (store, sink) = test_store();
        assert!(store.apply_preset(0).is_none());
        assert!(sink.notifications().is_empty());
    }

    // Sync configuration

    #[test]
    fn test_sync_config_roundtrip() {
        let (mut store, _) = test_store();
        assert_eq!(store.sync_config(), SyncConfig::default());

        store.set_sync_config("https://gist.github.com/u/abc123def", "ghp_token");

        let config = store.sync_config();
        assert_eq!(
            config.document_ref.as_deref(),
            Some("https://gist.github.com/u/abc123def")
        );
        assert_eq!(config.credential.as_deref(), Some("ghp_token"));
        assert!(config.can_push());
    }

    #[test]
    fn test_blank_sync_values_clear_fields() {
        let (mut store, _) = test_store();
        store.set_sync_config("abc123def", "ghp_token");

        store.set_sync_config("abc123def", "  ");

        let config = store.sync_config();
        assert_eq!(config.document_ref.as_deref(), Some("abc123def"));
        assert_eq!(config.credential, None);
        assert!(store.storage().get(SYNC_TOKEN_KEY).unwrap().is_none());

        store.set_sync_config("", "ghp_token");

        let config = store.sync_config();
        assert_eq!(config.document_ref, None);
        assert_eq!(config.credential.as_deref(), Some("ghp_token"));
        assert!(store.storage().get(SYNC_REF_KEY).unwrap().is_none());
    }

    // Medium failures

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let sink = RecordingSink::new();
        let mut store = LocalStore::new(ReadOnlyStore, sink.clone());

        assert!(!store.add_favorite("a"));

        assert!(store.favorites().is_empty());
        assert_eq!(sink.errors().len(), 1);
        assert!(sink.errors()[0].message.starts_with("Could not save changes"));
        assert_eq!(sink.notifications().len(), 1);
    }

    #[test]
    fn test_failed_writes_report_no_change() {
        let sink = RecordingSink::new();
        let mut store = LocalStore::new(ReadOnlyStore, sink.clone());

        assert!(!store.replace_favorites(&strings(&["a"])));
        assert!(!store.add_history_entry("copied"));
        assert!(!store.save_preset("p", "a", "b"));

        assert_eq!(sink.errors().len(), 3);
        assert!(sink.notifications().iter().all(|n| n.is_error));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp = TempDir::new().unwrap();

        {
            let mut store = LocalStore::new(
                FileStore::new(temp.path().to_path_buf()),
                RecordingSink::new(),
            );
            store.add_favorite("kept");
            store.add_history_entry("copied");
            store.save_preset("p", "a", "b");
        }

        let store = LocalStore::new(
            FileStore::new(temp.path().to_path_buf()),
            RecordingSink::new(),
        );
        assert_eq!(store.favorites(), strings(&["kept"]));
        assert_eq!(store.history()[0].text, "copied");
        assert_eq!(store.presets()[0].name, "p");
    }
}
