//! Cache warming: the single funnel for every real fetch in the engine.
//!
//! Hover predictions and lazy-load activations both land here, and the
//! issued-URL set makes each distinct resource cost at most one fetch no
//! matter how many triggers fire or in what order.

mod fetcher;

use std::collections::HashSet;

pub use fetcher::{Fetcher, HttpFetcher, NullFetcher};

use crate::manifest::SectionManifest;
use crate::prefs::QualityTier;

pub struct Preloader {
    fetcher: Box<dyn Fetcher>,
    issued: HashSet<String>,
    /// Issue order, for reporting.
    order: Vec<String>,
}

impl Preloader {
    pub fn new(fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            issued: HashSet::new(),
            order: Vec::new(),
        }
    }

    /// Warm a single resource. Returns true when a fetch was actually
    /// issued; repeat calls for the same URL are free.
    pub fn preload_image(&mut self, src: &str) -> bool {
        if src.is_empty() || self.issued.contains(src) {
            return false;
        }
        self.issued.insert(src.to_string());
        self.order.push(src.to_string());
        tracing::debug!("preload {src}");
        self.fetcher.fetch(src);
        true
    }

    /// Warm every deferred image in a section, using the source the lazy
    /// loader would pick for the given tier. Returns how many fetches were
    /// issued.
    pub fn preload_section(&mut self, section: &SectionManifest, tier: QualityTier) -> usize {
        let mut issued = 0;
        for image in &section.images {
            let src = match (tier, &image.low_src) {
                (QualityTier::Low, Some(low)) => low.as_str(),
                _ => image.src.as_str(),
            };
            if self.preload_image(src) {
                issued += 1;
            }
        }
        issued
    }

    /// Block until every issued transfer has finished. Callers that exit
    /// right after preloading must drain first or lose the transfers.
    pub fn drain(&self) {
        self.fetcher.drain();
    }

    pub fn was_issued(&self, src: &str) -> bool {
        self.issued.contains(src)
    }

    /// URLs fetched so far, in issue order.
    pub fn issued_in_order(&self) -> &[String] {
        &self.order
    }
}
