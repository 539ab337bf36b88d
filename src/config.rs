use crate::command::DEFAULT_COMMAND_TIMEOUT;
use crate::files::{DEFAULT_EXTENSIONS, ScanOptions};
use crate::utils::get_config_dir;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, read_to_string, write};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WallpaperConfig {
    /// Chronological wallpaper list: first entry is midnight, last is end of day.
    #[serde(default)]
    pub wallpapers: Vec<PathBuf>,
    #[serde(default)]
    pub notifications: bool,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_command_timeout_secs() -> u64 {
    DEFAULT_COMMAND_TIMEOUT.as_secs()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            wallpapers: Vec::new(),
            notifications: false,
            interval_secs: default_interval_secs(),
            command_timeout_secs: default_command_timeout_secs(),
            extensions: default_extensions(),
        }
    }
}

impl WallpaperConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join(PathBuf::from("config.json")))
    }

    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Reads `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = read_to_string(path)?;
            let config: Self =
                serde_json::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        write(path, content)?;
        Ok(())
    }

    /// Drops the entries at the given 1-based positions, as printed by `list`.
    ///
    /// Nothing is removed unless every position is in range. Returns the
    /// removed files in list order.
    pub fn remove_wallpapers(&mut self, positions: &[usize]) -> Result<Vec<PathBuf>> {
        let count = self.wallpapers.len();
        if let Some(bad) = positions.iter().find(|&&p| p == 0 || p > count) {
            return Err(Error::Config(format!(
                "No wallpaper number {}, the list has {} entries",
                bad, count
            )));
        }

        let mut removed = Vec::new();
        let mut position = 0;
        self.wallpapers.retain(|file| {
            position += 1;
            let keep = !positions.contains(&position);
            if !keep {
                removed.push(file.clone());
            }
            keep
        });
        Ok(removed)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions: self.extensions.clone(),
            include_path: true,
        }
    }
}
