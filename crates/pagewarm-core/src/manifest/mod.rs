//! Page manifest: the static page the engine works against.
//!
//! The view layer itself is out of scope; what the engine needs from it is
//! the column of sections, their vertical geometry, the deferred images they
//! contain, the interactive cards, and the nav order. All of that is
//! described in a TOML manifest loaded once at mount.

mod parse;

use std::collections::HashSet;
use std::path::Path;

pub use parse::{CardManifest, ImageManifest, Nav, PageManifest, PageMeta, SectionManifest};

/// Manifest loading / validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse manifest {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("duplicate section id {0:?}")]
    DuplicateSection(String),
    #[error("duplicate image id {0:?}")]
    DuplicateImage(String),
    #[error("card {card:?} references unknown image {image:?}")]
    UnknownCardImage { card: String, image: String },
    #[error("nav references unknown section {0:?}")]
    UnknownNavSection(String),
}

impl PageManifest {
    /// Load and validate a manifest from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let manifest: PageManifest =
            toml::from_str(&text).map_err(|source| ManifestError::Toml {
                path: path.display().to_string(),
                source,
            })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Ids must be unique and references must resolve.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut section_ids = HashSet::new();
        let mut image_ids = HashSet::new();

        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                return Err(ManifestError::DuplicateSection(section.id.clone()));
            }
            for image in &section.images {
                if !image_ids.insert(image.id.as_str()) {
                    return Err(ManifestError::DuplicateImage(image.id.clone()));
                }
            }
        }

        for section in &self.sections {
            let local: HashSet<&str> = section.images.iter().map(|i| i.id.as_str()).collect();
            for card in &section.cards {
                for image in &card.images {
                    if !local.contains(image.as_str()) {
                        return Err(ManifestError::UnknownCardImage {
                            card: card.id.clone(),
                            image: image.clone(),
                        });
                    }
                }
            }
        }

        for nav_id in &self.nav.sections {
            if !section_ids.contains(nav_id.as_str()) {
                return Err(ManifestError::UnknownNavSection(nav_id.clone()));
            }
        }

        Ok(())
    }

    pub fn section(&self, id: &str) -> Option<&SectionManifest> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn image(&self, id: &str) -> Option<&ImageManifest> {
        self.sections
            .iter()
            .flat_map(|s| s.images.iter())
            .find(|i| i.id == id)
    }

    /// All deferred images on the page, in document order.
    pub fn images(&self) -> impl Iterator<Item = &ImageManifest> {
        self.sections.iter().flat_map(|s| s.images.iter())
    }

    /// Section that owns the given card, with the card itself.
    pub fn card(&self, id: &str) -> Option<(&SectionManifest, &CardManifest)> {
        self.sections.iter().find_map(|s| {
            s.cards
                .iter()
                .find(|c| c.id == id)
                .map(|c| (s, c))
        })
    }
}
