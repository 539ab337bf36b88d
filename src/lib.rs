pub mod clock;
pub mod command;
pub mod config;
pub mod desktop;
pub mod files;
pub mod notify;
pub mod scheduler;
pub mod selector;
pub mod session;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::WallpaperConfig;
pub use desktop::{Dispatcher, WallpaperManager};
pub use scheduler::{Scheduler, SchedulerHandle};
pub use session::Session;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read wallpaper file: {}", .0.display())]
    Unreadable(PathBuf),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Command `{program}` timed out after {secs}s")]
    Timeout { program: String, secs: u64 },
    #[error("Desktop environment error: {0}")]
    DesktopEnv(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Scheduler is no longer running")]
    SchedulerStopped,
}

pub type Result<T> = std::result::Result<T, Error>;
