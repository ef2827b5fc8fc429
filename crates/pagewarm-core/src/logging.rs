//! Logging setup: a file under the XDG state dir, stderr when the file
//! cannot be opened.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,pagewarm=debug";

/// Where log lines end up after [`init`].
#[derive(Debug)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

/// Install the global tracing subscriber. Logs go to
/// `~/.local/state/pagewarm/pagewarm.log` when the file can be opened and to
/// stderr otherwise; the fallback keeps the CLI usable on a read-only home.
pub fn init() -> LogSink {
    match open_log_file() {
        Ok((file, path)) => {
            install(BoxMakeWriter::new(Mutex::new(file)));
            tracing::info!("logging to {}", path.display());
            LogSink::File(path)
        }
        Err(e) => {
            install(BoxMakeWriter::new(io::stderr));
            tracing::warn!("log file unavailable, logging to stderr: {e:#}");
            LogSink::Stderr
        }
    }
}

fn open_log_file() -> Result<(fs::File, PathBuf)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagewarm")?;
    let log_dir = xdg_dirs.get_state_home().join("pagewarm");
    fs::create_dir_all(&log_dir).with_context(|| format!("create {}", log_dir.display()))?;

    let path = log_dir.join("pagewarm.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;
    Ok((file, path))
}

fn install(writer: BoxMakeWriter) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}
