use clap::{Args, Subcommand};

use crate::console::{to_index, Store};

#[derive(Args)]
pub struct PresetCommand {
    #[command(subcommand)]
    pub command: PresetSubcommand,
}

#[derive(Subcommand)]
pub enum PresetSubcommand {
    /// List saved presets
    List,

    /// Save a prompt/negative pair under a name
    Save {
        /// Preset name
        name: String,

        /// Prompt text
        #[arg(long, short, default_value = "")]
        prompt: String,

        /// Negative prompt text
        #[arg(long, short, default_value = "")]
        negative: String,
    },

    /// Show the prompt and negative text of a preset
    Apply {
        /// Position (1-based) in `preset list`
        position: usize,
    },
}

impl PresetCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PresetSubcommand::List => {
                let presets = store.presets();
                if presets.is_empty() {
                    println!("No presets saved.");
                }
                for (i, preset) in presets.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, preset.name);
                }
            }
            PresetSubcommand::Save {
                name,
                prompt,
                negative,
            } => {
                if !store.save_preset(name, prompt, negative) {
                    println!("A preset needs a name.");
                }
            }
            PresetSubcommand::Apply { position } => {
                match to_index(*position).and_then(|i| store.apply_preset(i)) {
                    Some(preset) => println!("{}", preset),
                    None => println!("No preset at position {}.", position),
                }
            }
        }
        Ok(())
    }
}
