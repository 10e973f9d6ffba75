use clap::{Args, Subcommand};

use crate::console::{to_index, Store};

#[derive(Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub command: HistorySubcommand,
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// Show copied prompts, newest first
    List {
        /// Maximum number of entries to show
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// Record a copied prompt
    Add {
        /// Copied text
        text: String,
    },

    /// Delete an entry by its position in `history list`
    Remove {
        /// Position (1-based)
        position: usize,
    },

    /// Delete the whole history
    Clear {
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

impl HistoryCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            HistorySubcommand::List { limit } => {
                let history = store.history();
                if history.is_empty() {
                    println!("No clipboard history yet.");
                }
                let limit = limit.unwrap_or(history.len());
                for (i, entry) in history.iter().take(limit).enumerate() {
                    println!("{:>3}. {}", i + 1, entry);
                }
            }
            HistorySubcommand::Add { text } => {
                if store.add_history_entry(text) {
                    println!("Added to history.");
                }
            }
            HistorySubcommand::Remove { position } => {
                let removed = to_index(*position).and_then(|i| store.remove_history_entry(i));
                match removed {
                    Some(entry) => println!("Deleted: {}", entry.text),
                    None => println!("No history entry at position {}.", position),
                }
            }
            HistorySubcommand::Clear { yes } => {
                if *yes {
                    store.clear_history();
                } else {
                    println!("This deletes the whole clipboard history. Re-run with --yes.");
                }
            }
        }
        Ok(())
    }
}
