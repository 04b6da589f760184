//! Persistent user settings.
//!
//! Stored as RON under the platform config directory and loaded once per
//! invocation. Commands update the in-memory copy; `main` writes it back
//! after a successful command.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory under the platform config dir.
const APP_DIR: &str = "cyanpdf";
const FILE_NAME: &str = "settings.ron";

/// Settings remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of the last opened PDF.
    pub last_open_dir: Option<PathBuf>,
    /// Directory of the last written PDF.
    pub last_save_dir: Option<PathBuf>,
    /// Default profile for untagged RGB content.
    pub rgb_profile: Option<PathBuf>,
    /// Default profile for untagged CMYK content.
    pub cmyk_profile: Option<PathBuf>,
    /// Default profile for untagged gray content.
    pub gray_profile: Option<PathBuf>,
    /// Output intent profile.
    pub output_profile: Option<PathBuf>,
    /// Render intent code (0-3).
    pub intent: Option<u8>,
    /// Black point preservation.
    pub black_point: Option<bool>,
    /// Cache entry naming: `document` or `document-profile`.
    pub cache_key: Option<String>,
    /// Pinned Ghostscript executable.
    pub ghostscript: Option<PathBuf>,
}

/// Where settings come from and go to.
pub trait SettingsStore {
    /// Reads settings. Missing or unreadable data yields defaults.
    fn load(&self) -> Settings;

    /// Persists settings.
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// RON file store.
#[derive(Debug, Clone)]
pub struct RonSettingsStore {
    path: PathBuf,
}

impl RonSettingsStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/cyanpdf/settings.ron`, or in the working
    /// directory when the platform has no config location.
    pub fn platform() -> Self {
        let dir = dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_default();
        Self::new(dir.join(FILE_NAME))
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for RonSettingsStore {
    fn load(&self) -> Settings {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no settings, using defaults");
                return Settings::default();
            }
        };
        ron::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "corrupt settings, using defaults");
            Settings::default()
        })
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::default())
            .context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = RonSettingsStore::new(dir.path().join("settings.ron"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(intent: \"oops\"").unwrap();
        assert_eq!(RonSettingsStore::new(path).load(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let store = RonSettingsStore::new(dir.path().join("nested").join("settings.ron"));
        let settings = Settings {
            last_open_dir: Some("/jobs/in".into()),
            output_profile: Some("/icc/ISOcoated_v2_eci.icc".into()),
            intent: Some(3),
            black_point: Some(false),
            cache_key: Some("document-profile".into()),
            ..Default::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(intent: Some(0))").unwrap();
        let settings = RonSettingsStore::new(path).load();
        assert_eq!(settings.intent, Some(0));
        assert!(settings.output_profile.is_none());
    }
}
