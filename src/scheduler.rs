//! Periodic re-evaluation of the time-of-day wallpaper.
//!
//! A [`Scheduler`] starts idle. The first `start` request runs one cycle
//! right away and arms a recurring timer; later `start` requests are
//! ignored. Every request is served by the same loop that runs the cycles,
//! so a cycle never overlaps another one or a list mutation. The loop ends on
//! `shutdown` or once every [`SchedulerHandle`] has been dropped.

use crate::clock::Clock;
use crate::command::CommandRunner;
use crate::desktop::WallpaperManager;
use crate::session::Session;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Idle,
    Armed,
}

#[derive(Debug)]
enum Request {
    Start,
    SetList(Vec<PathBuf>),
    AppendList(Vec<PathBuf>),
    Preview(f64, oneshot::Sender<Option<PathBuf>>),
    State(oneshot::Sender<ScheduleState>),
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    requests: mpsc::UnboundedSender<Request>,
}

impl SchedulerHandle {
    fn send(&self, request: Request) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| Error::SchedulerStopped)
    }

    pub fn start(&self) -> Result<()> {
        self.send(Request::Start)
    }

    /// Replaces the wallpaper list. The next cycle or preview sees it.
    pub fn set_list(&self, wallpapers: Vec<PathBuf>) -> Result<()> {
        self.send(Request::SetList(wallpapers))
    }

    pub fn append_list(&self, more: impl IntoIterator<Item = PathBuf>) -> Result<()> {
        self.send(Request::AppendList(more.into_iter().collect()))
    }

    /// Wallpaper for `fraction` of the day, without applying it.
    pub async fn preview_at(&self, fraction: f64) -> Result<Option<PathBuf>> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Preview(fraction, reply))?;
        response.await.map_err(|_| Error::SchedulerStopped)
    }

    /// Current state. Answered only after every earlier request was handled.
    pub async fn state(&self) -> Result<ScheduleState> {
        let (reply, response) = oneshot::channel();
        self.send(Request::State(reply))?;
        response.await.map_err(|_| Error::SchedulerStopped)
    }

    pub fn shutdown(&self) {
        // Already stopped is fine.
        let _ = self.send(Request::Shutdown);
    }
}

pub struct Scheduler<M, R, C> {
    session: Session<M, R, C>,
    period: Duration,
    requests: mpsc::UnboundedReceiver<Request>,
    timer: Option<Interval>,
}

impl<M: WallpaperManager, R: CommandRunner, C: Clock> Scheduler<M, R, C> {
    pub fn new(session: Session<M, R, C>, period: Duration) -> (Self, SchedulerHandle) {
        let (sender, requests) = mpsc::unbounded_channel();
        let scheduler = Self {
            session,
            period,
            requests,
            timer: None,
        };
        (scheduler, SchedulerHandle { requests: sender })
    }

    pub fn state(&self) -> ScheduleState {
        if self.timer.is_some() {
            ScheduleState::Armed
        } else {
            ScheduleState::Idle
        }
    }

    /// Serves requests and timer ticks until shut down, then hands the
    /// session back.
    pub async fn run(mut self) -> Session<M, R, C> {
        loop {
            tokio::select! {
                biased;
                _ = next_tick(&mut self.timer) => {
                    self.session.run_cycle().await;
                }
                request = self.requests.recv() => match request {
                    None | Some(Request::Shutdown) => break,
                    Some(request) => self.handle(request).await,
                },
            }
        }

        log::info!("Wallpaper scheduler stopped");
        self.session
    }

    async fn handle(&mut self, request: Request) {
        match request {
            Request::Start => self.start().await,
            Request::SetList(wallpapers) => {
                log::debug!("Wallpaper list replaced ({} files)", wallpapers.len());
                self.session.set_list(wallpapers);
            }
            Request::AppendList(more) => {
                log::debug!("Added {} wallpapers", more.len());
                self.session.append_list(more);
            }
            Request::Preview(fraction, reply) => {
                let _ = reply.send(self.session.preview_at(fraction).map(Path::to_path_buf));
            }
            Request::State(reply) => {
                let _ = reply.send(self.state());
            }
            Request::Shutdown => {}
        }
    }

    async fn start(&mut self) {
        if self.timer.is_some() {
            log::debug!("Scheduler already running");
            return;
        }

        self.session.run_cycle().await;

        let mut timer = time::interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.timer = Some(timer);
        log::info!("Checking wallpaper every {}s", self.period.as_secs());
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
