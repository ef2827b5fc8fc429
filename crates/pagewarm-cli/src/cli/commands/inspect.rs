//! `pagewarm inspect` – summarize a page manifest.

use std::path::Path;

use anyhow::{Context, Result};
use pagewarm_core::manifest::PageManifest;

pub fn run_inspect(manifest_path: &Path) -> Result<()> {
    let manifest = PageManifest::load(manifest_path).context("load manifest")?;

    println!("page: {}", manifest.page.title);
    if let Some(url) = &manifest.page.resume_url {
        println!("resume: {url}");
    }
    if !manifest.nav.sections.is_empty() {
        println!("nav: {}", manifest.nav.sections.join(" > "));
    }

    println!();
    println!(
        "{:<14} {:>8} {:>8} {:>7} {:>6} {:>6}",
        "SECTION", "TOP", "HEIGHT", "REVEAL", "IMGS", "CARDS"
    );
    for s in &manifest.sections {
        println!(
            "{:<14} {:>8.0} {:>8.0} {:>7} {:>6} {:>6}",
            s.id,
            s.top,
            s.height,
            if s.reveal { "yes" } else { "-" },
            s.images.len(),
            s.cards.len()
        );
    }

    let images: Vec<_> = manifest.images().collect();
    if !images.is_empty() {
        println!();
        println!("{:<22} {:<10} {}", "IMAGE", "LOW-RES", "SRC");
        for i in images {
            println!(
                "{:<22} {:<10} {}",
                i.id,
                if i.low_src.is_some() { "yes" } else { "-" },
                i.src
            );
        }
    }

    Ok(())
}
