//! Scroll-position tracking for nav highlighting.
//!
//! On every scroll event the tracker probes a fixed line below the viewport
//! top and reports the first section, in nav priority order, whose box
//! straddles that line. Frames where nothing straddles the line keep the
//! previously active section.

use crate::geometry::Viewport;
use crate::manifest::PageManifest;

/// Probe line offset below the viewport top.
pub const DEFAULT_PROBE_OFFSET_PX: f64 = 100.0;

pub struct ScrollTracker {
    probe_offset: f64,
    /// Priority order; first match wins.
    order: Vec<String>,
    active: Option<String>,
}

impl ScrollTracker {
    pub fn new(order: Vec<String>, probe_offset: f64) -> Self {
        Self {
            probe_offset,
            order,
            active: None,
        }
    }

    pub fn from_manifest(manifest: &PageManifest, probe_offset: f64) -> Self {
        Self::new(manifest.nav.sections.clone(), probe_offset)
    }

    /// Recompute the active section, synchronously, for one scroll event.
    pub fn on_scroll(&mut self, manifest: &PageManifest, viewport: &Viewport) -> Option<&str> {
        let hit = self.order.iter().find(|id| {
            manifest
                .section(id)
                .is_some_and(|s| viewport.straddles_probe_line(&s.rect(), self.probe_offset))
        });
        if let Some(id) = hit {
            self.active = Some(id.clone());
        }
        self.active()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}
