use std::{
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::{Result, VisualiserError};

/// Wall-clock bookkeeping for one autoplay session.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    started: Instant,
    ticks: u64,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::start()
    }
}

impl PlaybackClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            ticks: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::start();
    }

    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Returned by a tick callback to keep or stop the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// Repeating timer running on its own thread.
///
/// Once [`Ticker::cancel`] returns, the callback is guaranteed not to run
/// again. Dropping the ticker cancels it.
#[derive(Debug)]
pub struct Ticker {
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Starts the worker thread. Fails only if the OS refuses a new thread.
    pub fn spawn<F>(interval: Duration, on_tick: F) -> Result<Self>
    where
        F: FnMut() -> TickControl + Send + 'static,
    {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
        let worker = thread::Builder::new()
            .name("autoplay-ticker".into())
            .spawn(move || run_ticker(interval, stop_rx, on_tick))
            .map_err(|err| {
                tracing::warn!(%err, "failed to spawn autoplay ticker thread");
                VisualiserError::Io(err)
            })?;

        Ok(Self {
            stop: Some(stop_tx),
            worker: Some(worker),
        })
    }

    /// True while the worker thread is still serving ticks.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Stops the ticker and waits for any in-flight callback to finish.
    pub fn cancel(&mut self) {
        // Disconnecting the channel is the stop signal.
        self.stop.take();

        if let Some(worker) = self.worker.take() {
            if worker.thread().id() == thread::current().id() {
                return;
            }
            if worker.join().is_err() {
                tracing::warn!("autoplay ticker panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn run_ticker<F>(interval: Duration, stop: Receiver<()>, mut on_tick: F)
where
    F: FnMut() -> TickControl,
{
    let ticks = crossbeam_channel::tick(interval);
    let mut clock = PlaybackClock::start();

    loop {
        let control = crossbeam_channel::select! {
            recv(stop) -> _ => TickControl::Stop,
            recv(ticks) -> _ => {
                // A cancel that raced with this tick wins.
                if matches!(stop.try_recv(), Err(TryRecvError::Empty)) {
                    clock.record_tick();
                    on_tick()
                } else {
                    TickControl::Stop
                }
            }
        };
        if control == TickControl::Stop {
            break;
        }
    }

    tracing::debug!(
        ticks = clock.ticks(),
        elapsed_ms = clock.elapsed().as_millis() as u64,
        "autoplay ticker stopped"
    );
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[test]
    fn stops_when_callback_asks() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let ticker = Ticker::spawn(Duration::from_millis(5), move || {
            if seen.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        })
        .expect("ticker should spawn");

        thread::sleep(Duration::from_millis(150));
        assert!(!ticker.is_running());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn no_ticks_after_cancel_returns() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let mut ticker = Ticker::spawn(Duration::from_millis(5), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            TickControl::Continue
        })
        .expect("ticker should spawn");

        thread::sleep(Duration::from_millis(30));
        ticker.cancel();
        let after_cancel = count.load(Ordering::SeqCst);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
        assert!(!ticker.is_running());
    }

    #[test]
    fn drop_cancels_ticker() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let ticker = Ticker::spawn(Duration::from_millis(5), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            TickControl::Continue
        })
        .expect("ticker should spawn");
        drop(ticker);

        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn clock_counts_ticks() {
        let mut clock = PlaybackClock::start();
        clock.record_tick();
        clock.record_tick();
        assert_eq!(clock.ticks(), 2);
        clock.reset();
        assert_eq!(clock.ticks(), 0);
    }
}
