//! `pagewarm prefs` – inspect and mutate the persisted preference file.

use clap::Subcommand;
use pagewarm_core::prefs::{PrefStore, QualityTier};

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print the current preferences.
    Show,
    /// Set the dark-mode flag.
    SetDarkMode {
        /// true or false.
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Set the image quality tier.
    SetQuality {
        /// high, medium or low.
        tier: QualityTier,
    },
}

pub fn run_prefs(command: PrefsCommand) {
    let mut store = PrefStore::open_default();
    match command {
        PrefsCommand::Show => {
            println!("dark_mode:     {}", store.dark_mode());
            println!("image_quality: {}", store.image_quality());
        }
        PrefsCommand::SetDarkMode { value } => {
            store.set_dark_mode(value);
            println!("dark_mode set to {value}");
        }
        PrefsCommand::SetQuality { tier } => {
            store.set_image_quality(tier);
            println!("image_quality set to {tier}");
        }
    }
}
