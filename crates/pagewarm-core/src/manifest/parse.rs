//! Serde structures for the TOML page manifest.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Top-level manifest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageManifest {
    pub page: PageMeta,
    /// Section priority order for the scroll tracker and the nav bar.
    #[serde(default)]
    pub nav: Nav,
    #[serde(default, rename = "section")]
    pub sections: Vec<SectionManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    /// Externally hosted PDF résumé, offered as a download link.
    #[serde(default)]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nav {
    #[serde(default)]
    pub sections: Vec<String>,
}

/// One page section: vertical geometry plus its deferred images and cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionManifest {
    pub id: String,
    pub top: f64,
    pub height: f64,
    /// Tagged for the one-shot fade-in reveal.
    #[serde(default)]
    pub reveal: bool,
    #[serde(default, rename = "image")]
    pub images: Vec<ImageManifest>,
    #[serde(default, rename = "card")]
    pub cards: Vec<CardManifest>,
}

impl SectionManifest {
    pub fn rect(&self) -> Rect {
        Rect::new(self.top, self.height)
    }
}

/// A deferred image: the real sources stay inert until activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageManifest {
    pub id: String,
    /// High-resolution source.
    pub src: String,
    /// Reduced-resolution variant for the low quality tier.
    #[serde(default)]
    pub low_src: Option<String>,
    pub top: f64,
    pub height: f64,
}

impl ImageManifest {
    pub fn rect(&self) -> Rect {
        Rect::new(self.top, self.height)
    }
}

/// An interactive card (e.g. a project tile); hovering it warms its images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardManifest {
    pub id: String,
    /// Ids of images in the owning section preloaded on hover.
    #[serde(default)]
    pub images: Vec<String>,
}
