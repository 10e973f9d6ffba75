mod config_cmd;
mod fav;
mod history;
mod preset;
mod sync_cmd;

pub use config_cmd::ConfigCommand;
pub use fav::FavCommand;
pub use history::HistoryCommand;
pub use preset::PresetCommand;
pub use sync_cmd::SyncCommand;
