use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::lazy::DEFAULT_MARGIN_PX;
use crate::reveal::{DEFAULT_BOTTOM_MARGIN_PX, DEFAULT_THRESHOLD};
use crate::scroll::DEFAULT_PROBE_OFFSET_PX;

/// Global configuration loaded from `~/.config/pagewarm/config.toml`.
///
/// Defaults are the contract values the page was written against; the file
/// exists so a session can be replayed with a different viewport or more
/// aggressive preloading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagewarmConfig {
    /// Viewport height used for replayed sessions.
    pub viewport_height: f64,
    /// Pre-trigger margin for the lazy loader.
    pub lazy_margin: f64,
    /// Probe line offset for active-section tracking.
    pub scroll_probe_offset: f64,
    /// Visible fraction at which a tagged section reveals.
    pub reveal_threshold: f64,
    /// Bottom-shifted root margin for the reveal observer.
    pub reveal_bottom_margin: f64,
}

impl Default for PagewarmConfig {
    fn default() -> Self {
        Self {
            viewport_height: 900.0,
            lazy_margin: DEFAULT_MARGIN_PX,
            scroll_probe_offset: DEFAULT_PROBE_OFFSET_PX,
            reveal_threshold: DEFAULT_THRESHOLD,
            reveal_bottom_margin: DEFAULT_BOTTOM_MARGIN_PX,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagewarm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PagewarmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PagewarmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PagewarmConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PagewarmConfig::default();
        assert_eq!(cfg.viewport_height, 900.0);
        assert_eq!(cfg.lazy_margin, 50.0);
        assert_eq!(cfg.scroll_probe_offset, 100.0);
        assert_eq!(cfg.reveal_threshold, 0.1);
        assert_eq!(cfg.reveal_bottom_margin, 100.0);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PagewarmConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PagewarmConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.viewport_height, cfg.viewport_height);
        assert_eq!(parsed.lazy_margin, cfg.lazy_margin);
        assert_eq!(parsed.reveal_threshold, cfg.reveal_threshold);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            viewport_height = 1080.0
            lazy_margin = 200.0
            scroll_probe_offset = 80.0
            reveal_threshold = 0.25
            reveal_bottom_margin = 0.0
        "#;
        let cfg: PagewarmConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.viewport_height, 1080.0);
        assert_eq!(cfg.lazy_margin, 200.0);
        assert_eq!(cfg.scroll_probe_offset, 80.0);
        assert_eq!(cfg.reveal_threshold, 0.25);
        assert_eq!(cfg.reveal_bottom_margin, 0.0);
    }
}
