//! Persistent user settings
//!
//! Settings live in a small TOML file under the user's home directory. The
//! [`SettingsStore`] is created once at startup and handed to whatever needs
//! it; nothing reads the file behind the caller's back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::configs::Format;
use crate::types::{KyleError, KyleResult};

const CONFIG_DIR: &str = "kyle";
const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_FORMAT_KEY: &str = "default_format";
pub const KEYS: &[&str] = &[DEFAULT_FORMAT_KEY];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Format used for new Kylefiles and for extensionless files without a
    /// `# kyle:` header.
    #[serde(default = "default_format")]
    pub default_format: Format,
}

fn default_format() -> Format {
    Format::Toml
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

impl Settings {
    pub fn get(&self, key: &str) -> KyleResult<String> {
        match key {
            DEFAULT_FORMAT_KEY => Ok(self.default_format.to_string()),
            _ => Err(KyleError::UnknownConfigKey(key.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> KyleResult<()> {
        match key {
            DEFAULT_FORMAT_KEY => {
                // Stored values are always lowercase, so only accept those
                self.default_format = Format::ALL
                    .into_iter()
                    .find(|format| format.name() == value)
                    .ok_or_else(|| KyleError::InvalidConfigValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        allowed: Format::ALL.map(Format::name).join(", "),
                    })?;
                Ok(())
            }
            _ => Err(KyleError::UnknownConfigKey(key.to_string())),
        }
    }
}

/// Handle on the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/kyle/config.toml`, or `./.config/kyle/config.toml` when
    /// there is no home directory.
    pub fn default_location() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(home.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings, falling back to defaults when the file is missing
    /// or cannot be parsed.
    pub fn load(&self) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Settings::default();
            }
            Err(e) => {
                let path = self.path.display();
                warn!(%path, error = %e, "failed to read settings, using defaults");
                return Settings::default();
            }
        };

        toml::from_str(&content).unwrap_or_else(|e| {
            let path = self.path.display();
            warn!(%path, error = %e, "invalid settings file, using defaults");
            Settings::default()
        })
    }

    pub fn get_value(&self, key: &str) -> KyleResult<String> {
        self.load().get(key)
    }

    /// Update a single key and write the file back.
    pub fn set(&self, key: &str, value: &str) -> KyleResult<Settings> {
        let mut settings = self.load();
        settings.set(key, value)?;
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn list(&self) -> Vec<(&'static str, String)> {
        let settings = self.load();
        KEYS.iter()
            .filter_map(|key| settings.get(key).ok().map(|value| (*key, value)))
            .collect()
    }

    /// Write `settings` over the keys they model. Other keys already in the
    /// file are written back unchanged.
    fn save(&self, settings: &Settings) -> KyleResult<()> {
        let mut table = self.read_table();
        if let toml::Value::Table(known) = toml::Value::try_from(settings)? {
            table.extend(known);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(&table)?)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// The file as a plain table, empty when missing or unparsable.
    fn read_table(&self) -> toml::Table {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }
}
