use crate::clock::{Clock, day_fraction};
use crate::command::CommandRunner;
use crate::desktop::{ApplyOutcome, Dispatcher, WallpaperManager};
use crate::selector::{select_file, select_index};
use std::path::{Path, PathBuf};

/// Result of one selection and apply pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The wallpaper list is empty.
    Idle,
    Applied(PathBuf),
    /// The selected file already was the active background.
    Unchanged(PathBuf),
    /// Applying the selected file failed; the background was left alone.
    Failed(PathBuf),
}

/// Owns the wallpaper list and the dispatcher that applies from it.
pub struct Session<M, R, C> {
    wallpapers: Vec<PathBuf>,
    dispatcher: Dispatcher<M, R>,
    clock: C,
}

impl<M: WallpaperManager, R: CommandRunner, C: Clock> Session<M, R, C> {
    pub fn new(wallpapers: Vec<PathBuf>, dispatcher: Dispatcher<M, R>, clock: C) -> Self {
        Self {
            wallpapers,
            dispatcher,
            clock,
        }
    }

    pub fn wallpapers(&self) -> &[PathBuf] {
        &self.wallpapers
    }

    pub fn dispatcher(&self) -> &Dispatcher<M, R> {
        &self.dispatcher
    }

    pub fn set_list(&mut self, wallpapers: Vec<PathBuf>) {
        self.wallpapers = wallpapers;
    }

    pub fn append_list(&mut self, more: impl IntoIterator<Item = PathBuf>) {
        self.wallpapers.extend(more);
    }

    /// Wallpaper for an arbitrary day fraction. Never applies anything.
    pub fn preview_at(&self, fraction: f64) -> Option<&Path> {
        select_file(fraction, &self.wallpapers)
    }

    /// Selects the wallpaper for the current time and applies it.
    ///
    /// Errors stop here: they are logged and reported as [`CycleOutcome::Failed`].
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let count = self.wallpapers.len();
        let Some(index) = select_index(day_fraction(self.clock.now()), count) else {
            log::debug!("No wallpapers configured, skipping");
            return CycleOutcome::Idle;
        };

        log::debug!("Wallpaper {} of {}", index + 1, count);
        let file = self.wallpapers[index].clone();

        match self.dispatcher.apply(&file).await {
            Ok(ApplyOutcome::Applied) => CycleOutcome::Applied(file),
            Ok(ApplyOutcome::AlreadyActive) => CycleOutcome::Unchanged(file),
            Err(e) => {
                log::error!("Cannot change wallpaper: {}", e);
                CycleOutcome::Failed(file)
            }
        }
    }
}
