use crate::command::CommandRunner;
use crate::{Error, Result};
use std::path::Path;

pub async fn set_wallpaper<R: CommandRunner>(runner: &R, path: &Path) -> Result<()> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::InvalidPath(format!("{} is not valid UTF-8", path.display())))?;
    runner
        .run("pcmanfm", &[format!("--set-wallpaper={}", path_str)])
        .await?;
    Ok(())
}
