//! In-memory collaborators for unit tests.

use crate::clock::Clock;
use crate::command::CommandRunner;
use crate::desktop::WallpaperManager;
use crate::notify::WallpaperEvents;
use crate::{Error, Result};
use chrono::NaiveTime;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Creates readable image files in a fresh temp dir, in the given order.
pub fn wallpaper_dir(names: &[&str]) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();
    let files = names
        .iter()
        .map(|name| {
            let path = dir.path().join(name);
            std::fs::write(&path, b"img").unwrap();
            path
        })
        .collect();
    (dir, files)
}

#[derive(Debug, Default)]
struct ManagerState {
    current: Option<PathBuf>,
    sets: Vec<PathBuf>,
    gets: usize,
    fail_get: bool,
    fail_set: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeManager {
    state: Rc<RefCell<ManagerState>>,
}

impl FakeManager {
    pub fn with_current(path: impl Into<PathBuf>) -> Self {
        let manager = Self::default();
        manager.state.borrow_mut().current = Some(path.into());
        manager
    }

    pub fn current(&self) -> Option<PathBuf> {
        self.state.borrow().current.clone()
    }

    pub fn set_calls(&self) -> Vec<PathBuf> {
        self.state.borrow().sets.clone()
    }

    pub fn get_count(&self) -> usize {
        self.state.borrow().gets
    }

    pub fn fail_get(&self, fail: bool) {
        self.state.borrow_mut().fail_get = fail;
    }

    pub fn fail_set(&self, fail: bool) {
        self.state.borrow_mut().fail_set = fail;
    }
}

impl WallpaperManager for FakeManager {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_set {
            return Err(Error::DesktopEnv("set refused".to_string()));
        }
        state.sets.push(path.to_path_buf());
        state.current = Some(path.to_path_buf());
        Ok(())
    }

    fn get_wallpaper(&self) -> Result<Option<PathBuf>> {
        let mut state = self.state.borrow_mut();
        state.gets += 1;
        if state.fail_get {
            return Err(Error::DesktopEnv("get refused".to_string()));
        }
        Ok(state.current.clone())
    }
}

#[derive(Debug, Default)]
struct RunnerState {
    /// Output of the desktop query; `None` makes the shell fail.
    desktop: Option<String>,
    gnome_current: Option<String>,
    failing: Vec<String>,
    failing_args: Vec<String>,
    calls: Vec<String>,
}

/// Scripted command runner that remembers every command line it was given.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    state: Rc<RefCell<RunnerState>>,
}

impl FakeRunner {
    pub fn with_desktop(desktop: &str) -> Self {
        let runner = Self::default();
        runner.state.borrow_mut().desktop = Some(desktop.to_string());
        runner
    }

    pub fn without_shell() -> Self {
        Self::default()
    }

    pub fn set_gnome_current(&self, uri: &str) {
        self.state.borrow_mut().gnome_current = Some(uri.to_string());
    }

    pub fn fail_program(&self, program: &str) {
        self.state.borrow_mut().failing.push(program.to_string());
    }

    /// Fails any command carrying `arg`.
    pub fn fail_arg(&self, arg: &str) {
        self.state.borrow_mut().failing_args.push(arg.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn calls_to(&self, program: &str) -> Vec<String> {
        let prefix = format!("{} ", program);
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with(&prefix))
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String> {
        let mut state = self.state.borrow_mut();
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        state.calls.push(line);

        if state.failing.iter().any(|failing| failing == program)
            || args.iter().any(|arg| state.failing_args.contains(arg))
        {
            return Err(Error::Command(format!("{} failed", program)));
        }

        match (program, args.first().map(String::as_str)) {
            ("sh", _) => state
                .desktop
                .clone()
                .ok_or_else(|| Error::Command("sh: not available".to_string())),
            ("gsettings", Some("get")) => Ok(state
                .gnome_current
                .as_ref()
                .map(|uri| format!("'{}'", uri))
                .unwrap_or_else(|| "''".to_string())),
            ("gsettings", Some("set")) if args.get(2).is_some_and(|key| key == "picture-uri") => {
                state.gnome_current = args.get(3).cloned();
                Ok(String::new())
            }
            _ => Ok(String::new()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingEvents {
    changed: Rc<RefCell<Vec<PathBuf>>>,
}

impl RecordingEvents {
    pub fn changed(&self) -> Vec<PathBuf> {
        self.changed.borrow().clone()
    }
}

impl WallpaperEvents for RecordingEvents {
    fn wallpaper_changed(&self, path: &Path) {
        self.changed.borrow_mut().push(path.to_path_buf());
    }
}

/// A clock tests can move.
#[derive(Debug, Clone)]
pub struct SharedClock(Rc<Cell<NaiveTime>>);

impl SharedClock {
    pub fn new(time: NaiveTime) -> Self {
        Self(Rc::new(Cell::new(time)))
    }

    pub fn set(&self, time: NaiveTime) {
        self.0.set(time);
    }
}

impl Clock for SharedClock {
    fn now(&self) -> NaiveTime {
        self.0.get()
    }
}

thread_local! {
    static LOGS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Routes `log` records into a per-thread buffer.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        LOGS.with(|logs| {
            logs.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Starts capturing log records emitted on the current thread.
pub fn capture_logs() {
    // Another test may have installed the logger already.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
    LOGS.with(|logs| logs.borrow_mut().clear());
}

/// Records captured on this thread since the last call.
pub fn take_logs() -> Vec<(log::Level, String)> {
    LOGS.with(|logs| logs.borrow_mut().drain(..).collect())
}
