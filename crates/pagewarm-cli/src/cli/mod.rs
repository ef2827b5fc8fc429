//! CLI for the pagewarm preloading engine.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pagewarm_core::config;
use pagewarm_core::connection::{ConnectionInfo, EffectiveType};
use std::path::PathBuf;

use commands::{run_classify, run_inspect, run_prefs, run_session, run_warm, PrefsCommand};

/// Top-level CLI for the pagewarm preloading engine.
#[derive(Debug, Parser)]
#[command(name = "pagewarm")]
#[command(about = "pagewarm: predictive preloading engine for a static portfolio page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Connection flags shared by the commands that classify a link.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConnectionArgs {
    /// Effective connection type (slow-2g, 2g, 3g, 4g). Omit to model an
    /// absent network-information capability.
    #[arg(long, value_name = "TYPE")]
    pub effective_type: Option<EffectiveType>,

    /// Data-saving mode is enabled (forces the low tier).
    #[arg(long)]
    pub save_data: bool,
}

impl ConnectionArgs {
    /// None when neither flag was given: the capability is absent.
    pub fn info(&self) -> Option<ConnectionInfo> {
        if self.effective_type.is_none() && !self.save_data {
            return None;
        }
        Some(ConnectionInfo {
            effective_type: self.effective_type,
            save_data: self.save_data,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Replay a recorded event trace against a page manifest and report the
    /// resulting fetches, activations and reveals.
    Run {
        /// Path to the page manifest (TOML).
        #[arg(long, value_name = "FILE")]
        manifest: PathBuf,

        /// Path to the event trace (JSON).
        #[arg(long, value_name = "FILE")]
        trace: PathBuf,

        /// Viewport height override.
        #[arg(long, value_name = "PX")]
        viewport: Option<f64>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Issue real warm-up fetches for a section (or the whole page).
    Warm {
        /// Path to the page manifest (TOML).
        #[arg(long, value_name = "FILE")]
        manifest: PathBuf,

        /// Section to warm; omit to warm every section.
        #[arg(long, value_name = "ID")]
        section: Option<String>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Print the quality tier for the given connection flags.
    Classify {
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Inspect or mutate persisted preferences.
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },

    /// List the sections, images and cards of a page manifest.
    Inspect {
        /// Path to the page manifest (TOML).
        #[arg(long, value_name = "FILE")]
        manifest: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                manifest,
                trace,
                viewport,
                connection,
            } => run_session(&manifest, &trace, viewport, connection.info(), &cfg)?,
            CliCommand::Warm {
                manifest,
                section,
                connection,
            } => run_warm(&manifest, section.as_deref(), connection.info())?,
            CliCommand::Classify { connection } => run_classify(connection.info()),
            CliCommand::Prefs { command } => run_prefs(command),
            CliCommand::Inspect { manifest } => run_inspect(&manifest)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
