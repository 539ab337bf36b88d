use crate::{Error, Result};
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "dynamicwallpaper";

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(|| {
            std::env::var("HOME").ok().map(|home| {
                PathBuf::from(home).join(".config")
            })
        })
        .map(|dir| dir.join(PathBuf::from(APP_DIR)))
        .ok_or_else(|| Error::Config(
            "Could not find config directory. Please set HOME or XDG_CONFIG_HOME environment variable.".to_string()
        ))?;

    if !config_dir.exists() {
        create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// `file://` URI for an absolute path, as expected by gsettings.
pub fn file_uri(path: &Path) -> Result<String> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::InvalidPath(format!("{} is not valid UTF-8", path.display())))?;
    Ok(format!("file://{}", path_str))
}

/// Turns a gsettings value such as `'file:///a/b.jpg'` back into a path.
pub fn path_from_uri(value: &str) -> Option<PathBuf> {
    let value = value.trim().trim_matches('\'').trim_matches('"');
    if value.is_empty() {
        return None;
    }
    let path_str = value.strip_prefix("file://").unwrap_or(value);
    Some(PathBuf::from(path_str))
}

#[cfg(feature = "notifications")]
pub fn send_notification(title: &str, message: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(title)
        .body(message)
        .show()
        .map_err(|e| Error::DesktopEnv(e.to_string()))?;
    Ok(())
}

#[cfg(not(feature = "notifications"))]
pub fn send_notification(title: &str, message: &str) -> Result<()> {
    log::debug!("Notifications disabled at build time: {}: {}", title, message);
    Ok(())
}
