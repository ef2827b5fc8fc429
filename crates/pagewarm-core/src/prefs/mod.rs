//! Persisted user preferences: dark mode and the image quality tier.
//!
//! The store wraps a small key/value backend. Writes go through immediately;
//! a backend that cannot persist degrades to session-only values without
//! surfacing an error to the caller.

mod backend;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use backend::{FilePrefs, MemPrefs, PrefBackend};

pub const KEY_DARK_MODE: &str = "dark_mode";
pub const KEY_IMAGE_QUALITY: &str = "image_quality";

/// Which of the two image variants gets fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    #[default]
    High,
    Medium,
    Low,
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
            QualityTier::Low => "low",
        };
        f.write_str(s)
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(QualityTier::High),
            "medium" => Ok(QualityTier::Medium),
            "low" => Ok(QualityTier::Low),
            other => Err(format!("unknown quality tier: {other:?}")),
        }
    }
}

/// Preference store: two keys, read at render time by the rest of the engine.
///
/// Missing or unreadable keys yield the documented defaults (`dark_mode =
/// false`, `image_quality = high`); they are never an error.
pub struct PrefStore {
    backend: Box<dyn PrefBackend>,
}

impl PrefStore {
    pub fn new(backend: Box<dyn PrefBackend>) -> Self {
        Self { backend }
    }

    /// Store over the default file backend (XDG state dir). If the state
    /// dir cannot be resolved, falls back to a memory backend.
    pub fn open_default() -> Self {
        match FilePrefs::open_default() {
            Ok(b) => Self::new(Box::new(b)),
            Err(e) => {
                tracing::warn!("pref file unavailable, using session-only prefs: {e:#}");
                Self::new(Box::new(MemPrefs::default()))
            }
        }
    }

    pub fn dark_mode(&self) -> bool {
        matches!(self.backend.get(KEY_DARK_MODE).as_deref(), Some("true"))
    }

    pub fn set_dark_mode(&mut self, on: bool) {
        self.backend.set(KEY_DARK_MODE, if on { "true" } else { "false" });
    }

    pub fn image_quality(&self) -> QualityTier {
        self.backend
            .get(KEY_IMAGE_QUALITY)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_image_quality(&mut self, tier: QualityTier) {
        self.backend.set(KEY_IMAGE_QUALITY, &tier.to_string());
    }
}
