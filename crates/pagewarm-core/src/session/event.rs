//! User-input events and JSON trace files.
//!
//! A trace is the recorded input of one page visit: scrolls, pointer
//! enters, dark-mode toggles, card expansion. Replaying it against a mounted
//! session reproduces the preload behavior deterministically.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One browser-delivered input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Pointer entered an interactive element's bounds.
    PointerEnter { target: String },
    /// Document scrolled to the given offset.
    Scroll { y: f64 },
    /// User toggled the dark-mode switch.
    ToggleDarkMode,
    /// A project card expanded (remounts its section's images).
    ExpandCard { target: String },
    /// The expanded card collapsed again.
    CollapseCard,
}

/// A recorded sequence of events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventTrace {
    pub events: Vec<Event>,
}

impl EventTrace {
    /// Load a trace from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read trace {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse trace {}", path.display()))
    }
}
