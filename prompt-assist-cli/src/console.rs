//! Terminal notification sink and store wiring.

use prompt_assist_core::{FileStore, LocalStore, NotificationSink, TracingSink};

use crate::config::Config;

pub type Store = LocalStore<FileStore, ConsoleSink>;

/// Prints notifications to the terminal and records them in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    log: TracingSink,
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, message: &str, is_error: bool) {
        self.log.notify(message, is_error);
        if is_error {
            eprintln!("✗ {}", message);
        } else {
            println!("✓ {}", message);
        }
    }
}

/// Opens the local store in the configured data directory.
pub fn open_store(config: &Config) -> Store {
    LocalStore::new(
        FileStore::new(config.data_dir.value.clone()),
        ConsoleSink::default(),
    )
}

/// Converts a 1-based position typed by the user to an index.
pub fn to_index(position: usize) -> Option<usize> {
    position.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_index() {
        assert_eq!(to_index(1), Some(0));
        assert_eq!(to_index(10), Some(9));
        assert_eq!(to_index(0), None);
    }
}
