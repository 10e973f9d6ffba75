mod history;
mod preset;
mod sync_config;

pub use history::{HistoryEntry, MAX_HISTORY};
pub use preset::Preset;
pub use sync_config::SyncConfig;
