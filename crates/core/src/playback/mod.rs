//! Stepped playback over a generated [`Run`].
//!
//! [`PlaybackController`] is a plain state machine: a run, a cursor and an
//! optional autoplay overlay. The phase and the render state are derived
//! from those three fields on demand, never stored next to them.
//! [`Player`] shares a controller with the autoplay [`Ticker`].

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use serde::Serialize;

use crate::{
    timeline::{TickControl, Ticker},
    Result, Run, SettledRegion, StepIndices, Value, VisualiserError,
};

/// Coarse playback state derived from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No run loaded.
    Idle,
    /// Run loaded, cursor at -1.
    Ready,
    /// `0 <= cursor < len - 1`.
    Stepping,
    /// Cursor at `len - 1`.
    Complete,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Stepping => "stepping",
            Self::Complete => "complete",
        }
    }
}

/// Why a command did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    NoRun,
    AlreadyStarted,
    AtEnd,
    AtStart,
}

/// Result of a playback command. Commands never fail, they either apply or
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored(Ignored),
}

impl Transition {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Result of toggling autoplay on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoPlayToggle {
    /// Autoplay is on; ticks must carry this epoch.
    Started { epoch: u64 },
    Stopped,
    Ignored(Ignored),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AutoPlay {
    epoch: u64,
    interval: Duration,
}

/// Everything a renderer needs for the current cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderState {
    pub snapshot: Vec<Value>,
    pub indices: StepIndices,
    pub sorted_boundary: Option<usize>,
    pub settled: Option<SettledRegion>,
    pub narration: String,
    pub phase: Phase,
    pub cursor: isize,
}

impl RenderState {
    pub fn is_settled(&self, index: usize) -> bool {
        match (self.settled, self.sorted_boundary) {
            (Some(region), Some(boundary)) => region.contains(boundary, index),
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct PlaybackController {
    run: Option<Arc<Run>>,
    cursor: Option<usize>,
    autoplay: Option<AutoPlay>,
    epochs: u64,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Idle -> Ready`. A run without steps lands directly in `Complete`.
    pub fn start(&mut self, run: impl Into<Arc<Run>>) -> Transition {
        if self.run.is_some() {
            tracing::debug!("start ignored: a run is already loaded");
            return Transition::Ignored(Ignored::AlreadyStarted);
        }

        let run = run.into();
        tracing::info!(algorithm = %run.algorithm(), steps = run.len(), "run started");
        self.run = Some(run);
        self.cursor = None;
        self.autoplay = None;
        Transition::Applied
    }

    pub fn phase(&self) -> Phase {
        self.phase_at(self.cursor)
    }

    fn phase_at(&self, cursor: Option<usize>) -> Phase {
        let Some(run) = &self.run else {
            return Phase::Idle;
        };
        match (cursor, run.len().checked_sub(1)) {
            (_, None) => Phase::Complete,
            (None, Some(_)) => Phase::Ready,
            (Some(cursor), Some(last)) if cursor >= last => Phase::Complete,
            (Some(_), Some(_)) => Phase::Stepping,
        }
    }

    /// Cursor in the `[-1, len - 1]` convention.
    pub fn cursor(&self) -> isize {
        self.cursor.map_or(-1, |cursor| cursor as isize)
    }

    pub fn run(&self) -> Option<&Arc<Run>> {
        self.run.as_ref()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.autoplay.map(|autoplay| autoplay.interval)
    }

    /// Manual step forward. Takes over from autoplay if it is running.
    pub fn next(&mut self) -> Transition {
        self.stop_autoplay();
        self.advance()
    }

    /// Manual step backward. Takes over from autoplay if it is running.
    pub fn previous(&mut self) -> Transition {
        self.stop_autoplay();
        if self.run.is_none() {
            return Transition::Ignored(Ignored::NoRun);
        }
        match self.cursor {
            None => Transition::Ignored(Ignored::AtStart),
            Some(cursor) => {
                self.cursor = cursor.checked_sub(1);
                tracing::debug!(cursor = self.cursor(), "stepped back");
                Transition::Applied
            }
        }
    }

    /// Turns autoplay on in `Ready`/`Stepping`, or off if it is already on.
    pub fn toggle_autoplay(&mut self, interval: Duration) -> AutoPlayToggle {
        if self.stop_autoplay() {
            return AutoPlayToggle::Stopped;
        }
        match self.phase() {
            Phase::Idle => AutoPlayToggle::Ignored(Ignored::NoRun),
            Phase::Complete => AutoPlayToggle::Ignored(Ignored::AtEnd),
            Phase::Ready | Phase::Stepping => {
                self.epochs += 1;
                let epoch = self.epochs;
                self.autoplay = Some(AutoPlay { epoch, interval });
                tracing::debug!(epoch, interval_ms = interval.as_millis() as u64, "autoplay on");
                AutoPlayToggle::Started { epoch }
            }
        }
    }

    /// Clears the autoplay overlay. Returns whether it was set.
    pub fn stop_autoplay(&mut self) -> bool {
        match self.autoplay.take() {
            Some(autoplay) => {
                tracing::debug!(epoch = autoplay.epoch, "autoplay off");
                true
            }
            None => false,
        }
    }

    /// Applies one autoplay step if `epoch` is still the live autoplay.
    pub fn tick(&mut self, epoch: u64) -> TickControl {
        if self.autoplay.map(|autoplay| autoplay.epoch) != Some(epoch) {
            tracing::debug!(epoch, "stale autoplay tick dropped");
            return TickControl::Stop;
        }

        self.advance();
        if self.phase() == Phase::Complete {
            self.autoplay = None;
            TickControl::Stop
        } else {
            TickControl::Continue
        }
    }

    /// Any state `-> Idle`.
    pub fn reset(&mut self) {
        if self.run.take().is_some() {
            tracing::info!("run reset");
        }
        self.cursor = None;
        self.autoplay = None;
    }

    fn advance(&mut self) -> Transition {
        match self.phase() {
            Phase::Idle => Transition::Ignored(Ignored::NoRun),
            Phase::Complete => Transition::Ignored(Ignored::AtEnd),
            Phase::Ready | Phase::Stepping => {
                self.cursor = Some(self.cursor.map_or(0, |cursor| cursor + 1));
                tracing::debug!(cursor = self.cursor(), "stepped forward");
                if self.phase() == Phase::Complete {
                    tracing::info!("run complete");
                }
                Transition::Applied
            }
        }
    }

    /// Render state for the cursor, or `None` while idle.
    pub fn render_state(&self) -> Option<RenderState> {
        self.render_state_at(self.cursor())
    }

    /// Render state the cursor would have at `position` (`-1` before the
    /// first step). `None` while idle or when `position` is past the end.
    pub fn render_state_at(&self, position: isize) -> Option<RenderState> {
        let run = self.run.as_ref()?;
        let cursor = usize::try_from(position).ok();
        if cursor.is_some_and(|cursor| cursor >= run.len()) || position < -1 {
            return None;
        }

        let algorithm = run.algorithm();
        let len = run.initial().len();
        let phase = self.phase_at(cursor);
        let settled = algorithm.settled_region();

        let state = match (phase, cursor.and_then(|cursor| run.step(cursor))) {
            (Phase::Complete, step) => RenderState {
                snapshot: step.map_or_else(|| run.initial().to_vec(), |s| s.snapshot.clone()),
                indices: step.map(|s| s.indices.finalized()).unwrap_or_default(),
                sorted_boundary: algorithm.final_boundary(len),
                settled,
                narration: run.final_narration(),
                phase,
                cursor: position,
            },
            (_, Some(step)) => RenderState {
                snapshot: step.snapshot.clone(),
                indices: step.indices,
                sorted_boundary: step.sorted_boundary,
                settled,
                narration: step.narration.clone(),
                phase,
                cursor: position,
            },
            (_, None) => RenderState {
                snapshot: run.initial().to_vec(),
                indices: StepIndices::none(),
                sorted_boundary: algorithm.initial_boundary(len),
                settled,
                narration: run.intro_narration(),
                phase,
                cursor: position,
            },
        };
        Some(state)
    }
}

/// Thread-safe owner of a [`PlaybackController`] and its autoplay ticker.
///
/// Every command cancels the ticker before touching the controller, so a
/// pending tick can never land after the command.
#[derive(Debug, Default)]
pub struct Player {
    controller: Arc<Mutex<PlaybackController>>,
    ticker: Option<Ticker>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, run: Run) -> Result<Transition> {
        self.cancel_ticker();
        Ok(self.lock()?.start(run))
    }

    pub fn next(&mut self) -> Result<Transition> {
        self.cancel_ticker();
        Ok(self.lock()?.next())
    }

    pub fn previous(&mut self) -> Result<Transition> {
        self.cancel_ticker();
        Ok(self.lock()?.previous())
    }

    /// Starts or stops autoplay. If the ticker thread cannot be spawned the
    /// controller is left with autoplay off and the error is returned.
    pub fn toggle_autoplay(&mut self, interval: Duration) -> Result<AutoPlayToggle> {
        let toggle = self.lock()?.toggle_autoplay(interval);
        match toggle {
            AutoPlayToggle::Started { epoch } => {
                self.cancel_ticker();
                let shared = Arc::clone(&self.controller);
                let spawned = Ticker::spawn(interval, move || match shared.lock() {
                    Ok(mut controller) => controller.tick(epoch),
                    Err(_) => TickControl::Stop,
                });
                match spawned {
                    Ok(ticker) => self.ticker = Some(ticker),
                    Err(err) => {
                        self.lock()?.stop_autoplay();
                        return Err(err);
                    }
                }
            }
            AutoPlayToggle::Stopped => self.cancel_ticker(),
            AutoPlayToggle::Ignored(_) => {}
        }
        Ok(toggle)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.cancel_ticker();
        self.lock()?.reset();
        Ok(())
    }

    pub fn phase(&self) -> Result<Phase> {
        Ok(self.lock()?.phase())
    }

    pub fn is_autoplaying(&self) -> Result<bool> {
        Ok(self.lock()?.is_autoplaying())
    }

    pub fn render_state(&self) -> Result<Option<RenderState>> {
        Ok(self.lock()?.render_state())
    }

    pub fn render_state_at(&self, position: isize) -> Result<Option<RenderState>> {
        Ok(self.lock()?.render_state_at(position))
    }

    pub fn cursor(&self) -> Result<isize> {
        Ok(self.lock()?.cursor())
    }

    /// Runs `f` against the controller under the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&PlaybackController) -> R) -> Result<R> {
        let controller = self.lock()?;
        Ok(f(&controller))
    }

    fn cancel_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, PlaybackController>> {
        self.controller
            .lock()
            .map_err(|_| VisualiserError::Poisoned("playback controller"))
    }
}
