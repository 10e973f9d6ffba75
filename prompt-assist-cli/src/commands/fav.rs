use clap::{Args, Subcommand};

use crate::console::{to_index, Store};

#[derive(Args)]
pub struct FavCommand {
    #[command(subcommand)]
    pub command: FavSubcommand,
}

#[derive(Subcommand)]
pub enum FavSubcommand {
    /// List saved favorites, newest first
    List,

    /// Save a snippet as a favorite
    Add {
        /// Snippet text
        text: String,
    },

    /// Remove a favorite by its position in `fav list`
    Remove {
        /// Position (1-based)
        position: usize,
    },
}

impl FavCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FavSubcommand::List => {
                let favorites = store.favorites();
                if favorites.is_empty() {
                    println!("No favorites yet.");
                }
                for (i, text) in favorites.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, text);
                }
            }
            FavSubcommand::Add { text } => {
                let text = text.trim();
                if text.is_empty() {
                    println!("Nothing to add.");
                } else if !store.add_favorite(text) && store.favorites().iter().any(|f| f == text) {
                    println!("Already a favorite.");
                }
            }
            FavSubcommand::Remove { position } => {
                let removed = to_index(*position).and_then(|i| store.remove_favorite(i));
                if removed.is_none() {
                    println!("No favorite at position {}.", position);
                }
            }
        }
        Ok(())
    }
}
