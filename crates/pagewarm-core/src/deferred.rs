//! Deferred image references.
//!
//! An image's real sources stay inert metadata until something activates the
//! reference; activation happens at most once and picks the variant matching
//! the current quality tier.

use crate::geometry::Rect;
use crate::manifest::ImageManifest;
use crate::prefs::QualityTier;

/// A lazily loaded image. `activated` is monotonic: it flips false→true at
/// most once and never reverts.
#[derive(Debug, Clone)]
pub struct DeferredImage {
    pub id: String,
    pub src: String,
    pub low_src: Option<String>,
    pub rect: Rect,
    activated: bool,
}

impl DeferredImage {
    pub fn new(
        id: impl Into<String>,
        src: impl Into<String>,
        low_src: Option<String>,
        rect: Rect,
    ) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            low_src,
            rect,
            activated: false,
        }
    }

    pub fn from_manifest(image: &ImageManifest) -> Self {
        Self::new(&image.id, &image.src, image.low_src.clone(), image.rect())
    }

    pub fn activated(&self) -> bool {
        self.activated
    }

    /// Source the given tier would fetch: the low-res variant on the low
    /// tier when one exists, the full-resolution source otherwise.
    pub fn source_for(&self, tier: QualityTier) -> &str {
        match (tier, &self.low_src) {
            (QualityTier::Low, Some(low)) => low,
            _ => &self.src,
        }
    }

    /// First call returns the source to fetch and marks the reference
    /// activated; every later call returns `None`.
    pub fn activate(&mut self, tier: QualityTier) -> Option<&str> {
        if self.activated {
            return None;
        }
        self.activated = true;
        Some(self.source_for(tier))
    }
}
