//! Background sweep thread.
//!
//! A [`Sweeper`] owns one named OS thread that runs a tick closure every
//! `interval` until it is stopped. The thread blocks on a stop channel with
//! `recv_timeout`, so stopping wakes it immediately instead of waiting out the
//! current interval.
//!
//! ```text
//!   owner                         sweeper thread
//!   ─────                         ──────────────
//!   spawn(interval, tick) ──────► loop {
//!                                   recv_timeout(interval)
//!                                     Timeout      → tick()
//!                                     Ok | Closed  → break
//!                                 }
//!   stop() / drop ───── () ─────►  (breaks, joined by owner)
//! ```
//!
//! Ticks never overlap: the next wait starts only after `tick` returns.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender};

/// Thread name used for sweeper threads.
pub const SWEEPER_THREAD_NAME: &str = "contentkit-ttl-sweeper";

/// Handle to a running sweep thread. Dropping it stops and joins the thread.
#[derive(Debug)]
pub struct Sweeper {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl Sweeper {
    /// Starts a thread calling `tick` every `interval`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn<F>(interval: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let handle = thread::Builder::new()
            .name(SWEEPER_THREAD_NAME.to_string())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => tick(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        tracing::debug!(interval_ms = interval.as_millis() as u64, "sweeper started");
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
            interval,
        })
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Signals the thread and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // A full or closed channel means the thread is already leaving.
            let _ = stop.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                tracing::error!("sweeper thread panicked");
            } else {
                tracing::debug!("sweeper stopped");
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn wait_for(counter: &AtomicUsize, at_least: usize) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if counter.load(Ordering::SeqCst) >= at_least {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn ticks_repeatedly_until_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let sweeper = Sweeper::spawn(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        assert!(wait_for(&ticks, 3));
        sweeper.stop();

        let after_stop = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn drop_stops_thread_without_waiting_for_interval() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let sweeper = Sweeper::spawn(Duration::from_secs(3600), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        assert_eq!(sweeper.interval(), Duration::from_secs(3600));

        let started = Instant::now();
        drop(sweeper);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
