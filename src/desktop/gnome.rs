use crate::Result;
use crate::command::CommandRunner;
use crate::utils::{file_uri, path_from_uri};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "org.gnome.desktop.background";
const KEY: &str = "picture-uri";
/// Read by GNOME 42+ when the dark style is active.
const DARK_KEY: &str = "picture-uri-dark";

pub async fn set_wallpaper<R: CommandRunner>(runner: &R, path: &Path) -> Result<()> {
    let uri = file_uri(path)?;
    let args = [
        "set".to_string(),
        SCHEMA.to_string(),
        KEY.to_string(),
        uri.clone(),
    ];
    runner.run("gsettings", &args).await?;

    // Older GNOME releases have no dark key.
    let dark_args = [
        "set".to_string(),
        SCHEMA.to_string(),
        DARK_KEY.to_string(),
        uri,
    ];
    if let Err(e) = runner.run("gsettings", &dark_args).await {
        log::debug!("Cannot set {}: {}", DARK_KEY, e);
    }
    Ok(())
}

pub async fn get_wallpaper<R: CommandRunner>(runner: &R) -> Result<Option<PathBuf>> {
    let args = ["get".to_string(), SCHEMA.to_string(), KEY.to_string()];
    let output = runner.run("gsettings", &args).await?;
    Ok(path_from_uri(&output))
}
