//! Preference persistence backends: JSON file under the XDG state dir, or
//! in-memory for tests and graceful degradation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Key/value persistence for the preference store. `set` writes through;
/// implementations must not fail loudly, persistence trouble degrades to
/// in-memory values.
pub trait PrefBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory backend: session-only preferences.
#[derive(Debug, Default)]
pub struct MemPrefs {
    values: BTreeMap<String, String>,
}

impl PrefBackend for MemPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// File backend: a flat JSON object at a fixed path, rewritten on every set.
///
/// A missing or unparseable file yields an empty map; a failed write keeps
/// the value in memory and logs at warn, so the caller never sees an error.
#[derive(Debug)]
pub struct FilePrefs {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePrefs {
    /// Default path: `~/.local/state/pagewarm/prefs.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("pagewarm")?;
        Ok(xdg_dirs.get_state_home().join("pagewarm").join("prefs.json"))
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::default_path().context("resolve pref path")?))
    }

    /// Open a backend at `path`, loading whatever is currently stored there.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("pref file {} not loaded: {e:#}", path.display());
            BTreeMap::new()
        });
        Self { path, values }
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }

    fn flush(&self) {
        let write = || -> Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create dir {}", parent.display()))?;
            }
            let json = serde_json::to_string_pretty(&self.values).context("serialize prefs")?;
            std::fs::write(&self.path, json)
                .with_context(|| format!("write {}", self.path.display()))?;
            Ok(())
        };
        if let Err(e) = write() {
            tracing::warn!("prefs not persisted, keeping in-memory value: {e:#}");
        }
    }
}

impl PrefBackend for FilePrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_prefs_get_set() {
        let mut b = MemPrefs::default();
        assert!(b.get("dark_mode").is_none());
        b.set("dark_mode", "true");
        assert_eq!(b.get("dark_mode").as_deref(), Some("true"));
    }

    #[test]
    fn file_prefs_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let b = FilePrefs::open(dir.path().join("prefs.json"));
        assert!(b.get("dark_mode").is_none());
    }

    #[test]
    fn file_prefs_write_through_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut b = FilePrefs::open(&path);
        b.set("image_quality", "low");
        assert!(path.exists());

        let reloaded = FilePrefs::open(&path);
        assert_eq!(reloaded.get("image_quality").as_deref(), Some("low"));
    }

    #[test]
    fn file_prefs_unwritable_path_keeps_value_in_memory() {
        // A path whose parent is a regular file cannot be created.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let mut b = FilePrefs::open(blocker.join("prefs.json"));
        b.set("dark_mode", "true");
        assert_eq!(b.get("dark_mode").as_deref(), Some("true"));
    }
}
