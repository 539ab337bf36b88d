use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const DEFAULT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extensions to keep, with or without the leading dot. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Return `dir/name` instead of the bare file name.
    pub include_path: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            include_path: false,
        }
    }
}

impl ScanOptions {
    pub fn with_full_paths(mut self) -> Self {
        self.include_path = true;
        self
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(extension) = path.extension() else {
            return false;
        };
        let extension = extension.to_string_lossy().to_lowercase();
        self.extensions
            .iter()
            .any(|wanted| wanted.trim_start_matches('.').to_lowercase() == extension)
    }
}

/// Lists the image files directly inside `dir`, sorted by file name.
pub async fn scan_directory(dir: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut images = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !options.matches(&path) {
            continue;
        }
        // Follows symlinks; dangling links and directories are skipped.
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            _ => continue,
        }

        if options.include_path {
            images.push(path);
        } else {
            images.push(PathBuf::from(entry.file_name()));
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Checks that `path` names a regular file this process can open for reading.
///
/// Permission and not-found failures report `false`. Only a malformed path is
/// an error.
pub async fn is_readable(path: &Path) -> Result<bool> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidPath("path is empty".to_string()));
    }

    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => {}
        _ => return Ok(false),
    }

    Ok(fs::File::open(path).await.is_ok())
}
