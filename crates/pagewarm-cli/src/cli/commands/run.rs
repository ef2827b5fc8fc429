//! `pagewarm run` – replay an event trace against a manifest and report.

use std::path::Path;

use anyhow::{Context, Result};
use pagewarm_core::config::PagewarmConfig;
use pagewarm_core::connection::ConnectionInfo;
use pagewarm_core::manifest::PageManifest;
use pagewarm_core::prefs::PrefStore;
use pagewarm_core::session::{EventTrace, Session};
use pagewarm_core::warm::NullFetcher;

pub fn run_session(
    manifest_path: &Path,
    trace_path: &Path,
    viewport: Option<f64>,
    conn: Option<ConnectionInfo>,
    cfg: &PagewarmConfig,
) -> Result<()> {
    let manifest = PageManifest::load(manifest_path).context("load manifest")?;
    let trace = EventTrace::load(trace_path)?;

    let mut cfg = cfg.clone();
    if let Some(height) = viewport {
        cfg.viewport_height = height;
    }

    // Replay is a dry run: report what would be fetched, fetch nothing.
    let mut session = Session::mount(
        manifest,
        PrefStore::open_default(),
        conn.as_ref(),
        Box::new(NullFetcher),
        &cfg,
    );
    session.replay(&trace);
    let report = session.report();
    session.unmount();

    println!("quality tier: {}", report.image_quality);
    println!("dark mode:    {}", report.dark_mode);
    println!(
        "active:       {}",
        report.active_section.as_deref().unwrap_or("-")
    );
    println!("revealed:     {}", report.revealed.join(", "));

    println!("\nfetched ({}):", report.fetched.len());
    for url in &report.fetched {
        println!("  {url}");
    }

    println!("\nactivations ({}):", report.activations.len());
    for a in &report.activations {
        println!("  {} -> {}", a.id, a.src);
    }

    Ok(())
}
