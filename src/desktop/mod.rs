use crate::command::{CommandRunner, SystemRunner};
use crate::files::is_readable;
use crate::notify::{ChangeNotifier, WallpaperEvents};
use crate::{Error, Result, WallpaperConfig};
use std::path::{Path, PathBuf};

pub mod gnome;
pub mod lxde;
pub mod probe;
pub mod system;

pub use probe::DesktopEnvironment;
pub use system::SystemWallpaper;

/// The OS primitive for reading and replacing the desktop background.
pub trait WallpaperManager {
    fn set_wallpaper(&self, path: &Path) -> Result<()>;
    fn get_wallpaper(&self) -> Result<Option<PathBuf>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFamily {
    Linux,
    Other,
}

impl HostFamily {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            HostFamily::Linux
        } else {
            HostFamily::Other
        }
    }
}

/// How a wallpaper gets applied, chosen once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformStrategy {
    Generic,
    GnomeLike,
    LxdeLike,
}

impl From<DesktopEnvironment> for PlatformStrategy {
    fn from(desktop: DesktopEnvironment) -> Self {
        match desktop {
            DesktopEnvironment::Gnome => PlatformStrategy::GnomeLike,
            DesktopEnvironment::Lxde => PlatformStrategy::LxdeLike,
            DesktopEnvironment::Other => PlatformStrategy::Generic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The file already was the active background; nothing was touched.
    AlreadyActive,
}

/// Sets wallpapers through the right backend, skipping files that are
/// already the active background.
pub struct Dispatcher<M, R> {
    host: HostFamily,
    /// `None` until the Linux desktop has been probed.
    strategy: Option<PlatformStrategy>,
    manager: M,
    runner: R,
    events: Box<dyn WallpaperEvents>,
}

pub fn system_dispatcher(config: &WallpaperConfig) -> Dispatcher<SystemWallpaper, SystemRunner> {
    Dispatcher::new(
        HostFamily::current(),
        SystemWallpaper,
        SystemRunner::new(config.command_timeout()),
        ChangeNotifier::new(config.notifications),
    )
}

impl<M: WallpaperManager, R: CommandRunner> Dispatcher<M, R> {
    pub fn new(
        host: HostFamily,
        manager: M,
        runner: R,
        events: impl WallpaperEvents + 'static,
    ) -> Self {
        let strategy = match host {
            HostFamily::Linux => None,
            HostFamily::Other => Some(PlatformStrategy::Generic),
        };
        Self {
            host,
            strategy,
            manager,
            runner,
            events: Box::new(events),
        }
    }

    pub fn host(&self) -> HostFamily {
        self.host
    }

    pub fn strategy(&self) -> Option<PlatformStrategy> {
        self.strategy
    }

    async fn resolve_strategy(&mut self) -> PlatformStrategy {
        if let Some(strategy) = self.strategy {
            return strategy;
        }

        let desktop = probe::probe(&self.runner).await;
        let strategy = PlatformStrategy::from(desktop);
        log::info!(
            "Desktop environment {:?}, applying wallpapers with {:?} strategy",
            desktop,
            strategy
        );
        self.strategy = Some(strategy);
        strategy
    }

    /// Current background as reported by the backend. Read failures are `None`.
    pub async fn active_background(&self, strategy: PlatformStrategy) -> Option<PathBuf> {
        let current = match strategy {
            PlatformStrategy::GnomeLike => gnome::get_wallpaper(&self.runner).await,
            PlatformStrategy::Generic | PlatformStrategy::LxdeLike => {
                self.manager.get_wallpaper()
            }
        };

        match current {
            Ok(current) => current,
            Err(e) => {
                log::debug!("Get current system wallpaper: {}", e);
                None
            }
        }
    }

    pub async fn apply(&mut self, file: &Path) -> Result<ApplyOutcome> {
        let strategy = self.resolve_strategy().await;

        if self.active_background(strategy).await.as_deref() == Some(file) {
            log::debug!("{} is already the active wallpaper", file.display());
            return Ok(ApplyOutcome::AlreadyActive);
        }

        if !is_readable(file).await? {
            return Err(Error::Unreadable(file.to_path_buf()));
        }

        match strategy {
            PlatformStrategy::Generic => self.manager.set_wallpaper(file)?,
            PlatformStrategy::GnomeLike => gnome::set_wallpaper(&self.runner, file).await?,
            PlatformStrategy::LxdeLike => lxde::set_wallpaper(&self.runner, file).await?,
        }

        self.events.wallpaper_changed(file);
        Ok(ApplyOutcome::Applied)
    }
}
