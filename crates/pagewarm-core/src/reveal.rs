//! One-shot fade-in reveal.
//!
//! Sections tagged for reveal flip to "revealed" the first time at least 10%
//! of their box is visible inside a viewport whose bottom edge is pulled up,
//! so the reveal fires slightly before full visibility. The flag never
//! reverts.

use std::collections::{HashMap, HashSet};

use crate::geometry::{Rect, Viewport};

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_BOTTOM_MARGIN_PX: f64 = 100.0;

pub struct RevealObserver {
    threshold: f64,
    bottom_margin: f64,
    watched: HashMap<String, Rect>,
    revealed: HashSet<String>,
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_BOTTOM_MARGIN_PX)
    }
}

impl RevealObserver {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold,
            bottom_margin,
            watched: HashMap::new(),
            revealed: HashSet::new(),
        }
    }

    pub fn observe(&mut self, id: impl Into<String>, rect: Rect) {
        self.watched.insert(id.into(), rect);
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    /// One intersection pass; returns ids newly crossing the threshold.
    pub fn tick(&mut self, viewport: &Viewport) -> Vec<String> {
        let mut newly: Vec<String> = self
            .watched
            .iter()
            .filter(|(id, _)| !self.revealed.contains(*id))
            .filter(|(_, rect)| {
                viewport.visible_fraction(rect, self.bottom_margin) >= self.threshold
            })
            .map(|(id, _)| id.clone())
            .collect();
        newly.sort();
        for id in &newly {
            tracing::debug!("revealed {id}");
            self.revealed.insert(id.clone());
        }
        newly
    }

    pub fn revealed(&self) -> impl Iterator<Item = &str> {
        self.revealed.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_the_fold_stays_hidden() {
        let mut obs = RevealObserver::default();
        obs.observe("about", Rect::new(2000.0, 800.0));
        assert!(obs.tick(&Viewport::new(0.0, 900.0)).is_empty());
        assert!(!obs.is_revealed("about"));
    }

    #[test]
    fn reveals_at_ten_percent_inside_margin() {
        let mut obs = RevealObserver::default();
        obs.observe("about", Rect::new(800.0, 1000.0));

        // Window after margin is [0, 800): nothing visible yet.
        assert!(obs.tick(&Viewport::new(0.0, 900.0)).is_empty());

        // Scrolled down 200px: window [200, 1000), overlap 200/1000 = 20%.
        let newly = obs.tick(&Viewport::new(200.0, 900.0));
        assert_eq!(newly, vec!["about".to_string()]);
        assert!(obs.is_revealed("about"));
    }

    #[test]
    fn fraction_just_under_threshold_does_not_reveal() {
        let mut obs = RevealObserver::default();
        obs.observe("about", Rect::new(750.0, 1000.0));
        // Window [0, 800): overlap 50/1000 = 5% < 10%.
        assert!(obs.tick(&Viewport::new(0.0, 900.0)).is_empty());
    }

    #[test]
    fn reveal_never_reverts_after_scrolling_away() {
        let mut obs = RevealObserver::default();
        obs.observe("about", Rect::new(100.0, 500.0));
        assert_eq!(obs.tick(&Viewport::new(0.0, 900.0)).len(), 1);

        // Scrolled far away: not newly revealed, flag stays set.
        assert!(obs.tick(&Viewport::new(10_000.0, 900.0)).is_empty());
        assert!(obs.is_revealed("about"));

        // Coming back does not re-fire.
        assert!(obs.tick(&Viewport::new(0.0, 900.0)).is_empty());
    }

    #[test]
    fn multiple_elements_reveal_independently() {
        let mut obs = RevealObserver::default();
        obs.observe("about", Rect::new(100.0, 500.0));
        obs.observe("projects", Rect::new(3000.0, 500.0));

        assert_eq!(obs.tick(&Viewport::new(0.0, 900.0)), vec!["about".to_string()]);
        assert_eq!(
            obs.tick(&Viewport::new(2900.0, 900.0)),
            vec!["projects".to_string()]
        );
        assert_eq!(obs.revealed().count(), 2);
    }
}
