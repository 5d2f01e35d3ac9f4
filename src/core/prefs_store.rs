//! Player preferences on disk
//!
//! One JSON file under the platform config directory. A missing or unreadable
//! file loads as empty preferences.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::types::{PlayerPrefs, PrefsError};

const APP_DIR: &str = "lightsout";
const PREFS_FILE: &str = "prefs.json";

/// Reads and writes `PlayerPrefs`
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform config directory
    pub fn default_location() -> Result<Self, PrefsError> {
        let dir = dirs::config_dir().ok_or(PrefsError::NoConfigDir)?;
        Ok(Self::at(dir.join(APP_DIR).join(PREFS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences; problems are logged and yield defaults
    pub fn load(&self) -> PlayerPrefs {
        if !self.path.exists() {
            return PlayerPrefs::default();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Failed to read preferences at {:?}: {}", self.path, err);
                return PlayerPrefs::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!("Failed to parse preferences at {:?}: {}", self.path, err);
                PlayerPrefs::default()
            }
        }
    }

    /// Write preferences, creating the directory if needed
    pub fn save(&self, prefs: &PlayerPrefs) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load, fold in a successful submission, save
    pub fn remember(&self, player_name: &str, linkedin_url: Option<&str>) -> Result<PlayerPrefs, PrefsError> {
        let mut prefs = self.load();
        prefs.remember(player_name, linkedin_url);
        self.save(&prefs)?;
        Ok(prefs)
    }
}
