use super::WallpaperManager;
use crate::utils::path_from_uri;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// The platform's native background API, through the `wallpaper` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallpaper;

impl WallpaperManager for SystemWallpaper {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        let path_str = path
            .to_str()
            .ok_or_else(|| Error::InvalidPath(format!("{} is not valid UTF-8", path.display())))?;

        wallpaper::set_from_path(path_str).map_err(|e| Error::DesktopEnv(e.to_string()))
    }

    fn get_wallpaper(&self) -> Result<Option<PathBuf>> {
        let current = wallpaper::get().map_err(|e| Error::DesktopEnv(e.to_string()))?;
        Ok(path_from_uri(&current))
    }
}
