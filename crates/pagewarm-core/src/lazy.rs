//! Visibility-driven loader.
//!
//! Watches deferred images and activates each one the first time its box
//! comes within a pre-trigger margin of the viewport. An activated image is
//! dropped from the watch set, so repeated intersection is a no-op, and
//! re-observing it after a section remount neither re-watches nor refetches.

use std::collections::HashMap;

use crate::deferred::DeferredImage;
use crate::geometry::Viewport;
use crate::prefs::QualityTier;

/// Activate slightly before the element is visible to mask fetch latency.
pub const DEFAULT_MARGIN_PX: f64 = 50.0;

/// An image crossing into the expanded viewport: fetch `src` now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub id: String,
    pub src: String,
}

pub struct LazyLoader {
    margin: f64,
    /// Watch set: not-yet-activated images keyed by id.
    watched: HashMap<String, DeferredImage>,
    /// Ids that have already activated; kept so remounts cannot re-watch.
    activated: HashMap<String, String>,
}

impl Default for LazyLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_PX)
    }
}

impl LazyLoader {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            watched: HashMap::new(),
            activated: HashMap::new(),
        }
    }

    /// Start watching an image. Re-observing an id that is already watched
    /// or already activated is a no-op.
    pub fn observe(&mut self, image: DeferredImage) {
        if self.activated.contains_key(&image.id) || self.watched.contains_key(&image.id) {
            return;
        }
        tracing::trace!("observing {}", image.id);
        self.watched.insert(image.id.clone(), image);
    }

    /// Stop watching an image without activating it.
    pub fn unobserve(&mut self, id: &str) {
        self.watched.remove(id);
    }

    pub fn observed(&self, id: &str) -> bool {
        self.watched.contains_key(id)
    }

    pub fn is_activated(&self, id: &str) -> bool {
        self.activated.contains_key(id)
    }

    /// Source an activated image resolved to, if it has activated.
    pub fn activated_src(&self, id: &str) -> Option<&str> {
        self.activated.get(id).map(String::as_str)
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Deliver an intersection pass: every watched image whose box is within
    /// `margin` of the viewport activates, leaves the watch set, and is
    /// reported for fetching.
    pub fn tick(&mut self, viewport: &Viewport, tier: QualityTier) -> Vec<Activation> {
        let due: Vec<String> = self
            .watched
            .values()
            .filter(|img| viewport.intersects_with_margin(&img.rect, self.margin))
            .map(|img| img.id.clone())
            .collect();

        let mut out = Vec::with_capacity(due.len());
        for id in due {
            let mut image = match self.watched.remove(&id) {
                Some(img) => img,
                None => continue,
            };
            if let Some(src) = image.activate(tier) {
                let src = src.to_string();
                tracing::debug!("lazy activation: {id} -> {src}");
                self.activated.insert(id.clone(), src.clone());
                out.push(Activation { id, src });
            }
        }
        // Stable order for callers and tests.
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Dispose every watcher (section unmount). Activation history is kept:
    /// the flag is monotonic across remounts.
    pub fn clear(&mut self) {
        self.watched.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn image(id: &str, top: f64) -> DeferredImage {
        DeferredImage::new(
            id,
            format!("/assets/{}.png", id.replace('/', "-")),
            Some(format!("/assets/{}-small.png", id.replace('/', "-"))),
            Rect::new(top, 300.0),
        )
    }

    #[test]
    fn activates_once_inside_margin() {
        let mut loader = LazyLoader::default();
        loader.observe(image("hero/banner", 920.0));

        // 920 > 900 but within the 50px margin.
        let acts = loader.tick(&Viewport::new(0.0, 900.0), QualityTier::High);
        assert_eq!(acts.len(), 1);
        assert_eq!(acts[0].id, "hero/banner");
        assert_eq!(acts[0].src, "/assets/hero-banner.png");
        assert!(loader.is_activated("hero/banner"));
        assert!(!loader.observed("hero/banner"));
    }

    #[test]
    fn below_margin_stays_deferred() {
        let mut loader = LazyLoader::default();
        loader.observe(image("hero/banner", 951.0));
        let acts = loader.tick(&Viewport::new(0.0, 900.0), QualityTier::High);
        assert!(acts.is_empty());
        assert!(loader.observed("hero/banner"));
    }

    #[test]
    fn intersection_toggling_activates_exactly_once() {
        let mut loader = LazyLoader::default();
        loader.observe(image("about/portrait", 1000.0));

        let visible = Viewport::new(800.0, 900.0);
        let away = Viewport::new(5000.0, 900.0);
        assert_eq!(loader.tick(&visible, QualityTier::High).len(), 1);
        assert!(loader.tick(&away, QualityTier::High).is_empty());
        assert!(loader.tick(&visible, QualityTier::High).is_empty());
        assert!(loader.is_activated("about/portrait"));
    }

    #[test]
    fn low_tier_activation_uses_low_res_source() {
        let mut loader = LazyLoader::default();
        loader.observe(image("about/portrait", 100.0));
        let acts = loader.tick(&Viewport::new(0.0, 900.0), QualityTier::Low);
        assert_eq!(acts[0].src, "/assets/about-portrait-small.png");
    }

    #[test]
    fn reobserve_after_activation_is_noop() {
        let mut loader = LazyLoader::default();
        loader.observe(image("about/portrait", 100.0));
        loader.tick(&Viewport::new(0.0, 900.0), QualityTier::High);

        // Section remount re-observes everything; activated ids must not
        // come back as watchers or produce a second fetch.
        loader.observe(image("about/portrait", 100.0));
        assert_eq!(loader.watched_count(), 0);
        assert!(loader.tick(&Viewport::new(0.0, 900.0), QualityTier::High).is_empty());
    }

    #[test]
    fn clear_disposes_watchers_but_keeps_history() {
        let mut loader = LazyLoader::default();
        loader.observe(image("a/one", 100.0));
        loader.observe(image("a/two", 5000.0));
        loader.tick(&Viewport::new(0.0, 900.0), QualityTier::High);

        loader.clear();
        assert_eq!(loader.watched_count(), 0);
        assert!(loader.is_activated("a/one"));

        // Remount: only the never-activated image is watched again.
        loader.observe(image("a/one", 100.0));
        loader.observe(image("a/two", 5000.0));
        assert_eq!(loader.watched_count(), 1);
    }

    #[test]
    fn tick_reports_multiple_in_stable_order() {
        let mut loader = LazyLoader::default();
        loader.observe(image("b/two", 200.0));
        loader.observe(image("a/one", 100.0));
        let acts = loader.tick(&Viewport::new(0.0, 900.0), QualityTier::High);
        let ids: Vec<&str> = acts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a/one", "b/two"]);
    }
}
