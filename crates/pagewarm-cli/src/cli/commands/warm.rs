//! `pagewarm warm` – issue real warm-up fetches for manifest images.

use std::path::Path;

use anyhow::{bail, Context, Result};
use pagewarm_core::connection::{self, ConnectionInfo};
use pagewarm_core::manifest::PageManifest;
use pagewarm_core::warm::{HttpFetcher, Preloader};

pub fn run_warm(
    manifest_path: &Path,
    section_id: Option<&str>,
    conn: Option<ConnectionInfo>,
) -> Result<()> {
    let manifest = PageManifest::load(manifest_path).context("load manifest")?;
    let tier = connection::classify(conn.as_ref());

    let mut preloader = Preloader::new(Box::new(HttpFetcher::default()));
    let issued = match section_id {
        Some(id) => {
            let Some(section) = manifest.section(id) else {
                bail!("no section {id:?} in {}", manifest_path.display());
            };
            preloader.preload_section(section, tier)
        }
        None => manifest
            .sections
            .iter()
            .map(|s| preloader.preload_section(s, tier))
            .sum(),
    };

    println!("warming {issued} resource(s) at tier {tier}:");
    for url in preloader.issued_in_order() {
        println!("  {url}");
    }
    // Transfers run on their own threads; wait them out so exiting does not
    // kill them mid-flight.
    preloader.drain();
    Ok(())
}
