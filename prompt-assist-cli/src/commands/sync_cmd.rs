//! Sync CLI commands for sharing favorites through a gist.

use clap::{Args, Subcommand};

use prompt_assist_core::{DocumentId, GistApi, RemoteSyncClient, SyncError};

use crate::config::Config;
use crate::console::Store;

/// Sync favorites with a gist
#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: SyncSubcommand,
}

#[derive(Debug, Subcommand)]
enum SyncSubcommand {
    /// Merge the gist's favorites into the local ones
    Pull {
        /// Gist URL or id (defaults to the saved one)
        gist: Option<String>,
    },

    /// Overwrite the gist's favorites with the local ones
    Push {
        /// Gist URL or id (defaults to the saved one)
        gist: Option<String>,

        /// GitHub token with gist scope (defaults to the saved one)
        #[arg(long, short)]
        token: Option<String>,
    },

    /// Save the gist and token used by pull and push
    Set {
        /// Gist URL or id; an empty value forgets it
        #[arg(long, short)]
        gist: Option<String>,

        /// GitHub token; an empty value forgets it
        #[arg(long, short)]
        token: Option<String>,
    },

    /// Show the saved sync settings
    Status,
}

impl SyncCommand {
    pub fn run(&self, store: &mut Store, config: &Config) -> Result<(), SyncCommandError> {
        match &self.command {
            SyncSubcommand::Pull { gist } => {
                let client = RemoteSyncClient::new(GistApi::with_base_url(&config.api_url.value));
                let rt = runtime()?;
                match rt.block_on(client.pull(store, gist.as_deref())) {
                    Ok(result) => {
                        println!("{} favorites after merge.", result.favorites.len());
                        Ok(())
                    }
                    Err(e) => Err(SyncCommandError::SyncFailed(e)),
                }
            }
            SyncSubcommand::Push { gist, token } => {
                let client = RemoteSyncClient::new(GistApi::with_base_url(&config.api_url.value));
                let rt = runtime()?;
                match rt.block_on(client.push(store, gist.as_deref(), token.as_deref())) {
                    Ok(result) => {
                        println!("Gist {} updated.", result.document_id);
                        Ok(())
                    }
                    Err(e) => Err(SyncCommandError::SyncFailed(e)),
                }
            }
            SyncSubcommand::Set { gist, token } => {
                let current = store.sync_config();
                let gist = gist.clone().or(current.document_ref).unwrap_or_default();
                let token = token.clone().or(current.credential).unwrap_or_default();

                if !gist.trim().is_empty() && DocumentId::resolve(&gist).is_err() {
                    return Err(SyncCommandError::InvalidGist(gist));
                }

                store.set_sync_config(&gist, &token);
                println!("Sync settings saved.");
                Ok(())
            }
            SyncSubcommand::Status => {
                self.status(store, config);
                Ok(())
            }
        }
    }

    fn status(&self, store: &Store, config: &Config) {
        let sync = store.sync_config();

        println!("Sync Configuration");
        println!("==================");
        println!();
        println!("API:   {}", config.api_url.value);

        match &sync.document_ref {
            Some(reference) => {
                let id = DocumentId::resolve(reference)
                    .map(|id| id.to_string())
                    .unwrap_or_else(|_| "unresolvable".to_string());
                println!("Gist:  {} (id {})", reference, id);
            }
            None => println!("Gist:  not set"),
        }
        println!(
            "Token: {}",
            if sync.credential.is_some() {
                "saved"
            } else {
                "not set (pull only)"
            }
        );

        if !sync.can_push() {
            println!();
            println!("To enable push, run:");
            println!("  pa sync set --gist <url-or-id> --token <github-token>");
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, SyncCommandError> {
    tokio::runtime::Runtime::new().map_err(|e| SyncCommandError::RuntimeError(e.to_string()))
}

/// Errors from sync commands
#[derive(Debug)]
pub enum SyncCommandError {
    InvalidGist(String),
    RuntimeError(String),
    SyncFailed(SyncError),
}

impl std::fmt::Display for SyncCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncCommandError::InvalidGist(s) => {
                write!(f, "Could not find a gist id in {:?}", s)
            }
            SyncCommandError::RuntimeError(e) => write!(f, "Runtime error: {}", e),
            SyncCommandError::SyncFailed(e) => write!(f, "Sync failed: {}", e),
        }
    }
}

impl std::error::Error for SyncCommandError {}
