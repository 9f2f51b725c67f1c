//! Cancellable scheduled tasks owned by the timer engine.
//!
//! The engine never sleeps itself. It asks a `Scheduler` to start or cancel
//! the 1 Hz ticker and the message expiry; scheduled work comes back as
//! `Command`s on the engine's channel.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Duration, Instant, MissedTickBehavior};
use tracing::debug;

use super::command::{Command, MessageToken, TickToken};

/// Interval between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Trait for the engine's deferred work.
///
/// Implementations must make every method idempotent: cancelling twice, or
/// starting a ticker that is already running, must be harmless.
pub trait Scheduler {
    /// Starts delivering `Command::Tick(token)` once per second, replacing any
    /// running ticker.
    fn start_ticker(&mut self, token: TickToken);

    /// Stops delivering ticks.
    fn cancel_ticker(&mut self);

    /// Delivers `Command::ExpireMessage(token)` after `delay`, replacing any pending expiry.
    fn schedule_expiry(&mut self, token: MessageToken, delay: Duration);

    /// Drops the pending expiry, if any.
    fn cancel_expiry(&mut self);
}

// ============================================================================
// TokioScheduler
// ============================================================================

/// Scheduler backed by tokio tasks.
///
/// Must be used from within a tokio runtime. Dropping the scheduler aborts
/// both tasks.
#[derive(Debug)]
pub struct TokioScheduler {
    command_tx: mpsc::UnboundedSender<Command>,
    ticker: Option<JoinHandle<()>>,
    expiry: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    /// Creates a scheduler that feeds the given command channel.
    pub fn new(command_tx: mpsc::UnboundedSender<Command>) -> Self {
        Self {
            command_tx,
            ticker: None,
            expiry: None,
        }
    }

    /// Returns true while a ticker task is alive.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Returns true while an expiry task is pending.
    pub fn has_pending_expiry(&self) -> bool {
        self.expiry.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Scheduler for TokioScheduler {
    fn start_ticker(&mut self, token: TickToken) {
        self.cancel_ticker();

        let tx = self.command_tx.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.send(Command::Tick(token)).is_err() {
                    break;
                }
            }
        }));
        debug!(token = token.0, "ticker started");
    }

    fn cancel_ticker(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.abort();
            debug!("ticker cancelled");
        }
    }

    fn schedule_expiry(&mut self, token: MessageToken, delay: Duration) {
        self.cancel_expiry();

        let tx = self.command_tx.clone();
        self.expiry = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(Command::ExpireMessage(token));
        }));
        debug!(token = token.0, "message expiry scheduled");
    }

    fn cancel_expiry(&mut self) {
        if let Some(task) = self.expiry.take() {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_ticker();
        self.cancel_expiry();
    }
}

// ============================================================================
// ManualScheduler
// ============================================================================

/// Scheduler that only records what the engine asked for.
///
/// Tests drive time by calling the engine's `tick` / `expire_message`
/// directly and use this to check that tasks were armed or cancelled.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    ticker: Option<TickToken>,
    pending_expiry: Option<(MessageToken, Duration)>,
    ticker_starts: usize,
    ticker_cancels: usize,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the ticker is armed.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Returns the token of the armed ticker, if any.
    #[must_use]
    pub fn ticker_token(&self) -> Option<TickToken> {
        self.ticker
    }

    /// Returns the pending expiry, if any.
    #[must_use]
    pub fn pending_expiry(&self) -> Option<(MessageToken, Duration)> {
        self.pending_expiry
    }

    /// Number of times the ticker was started.
    #[must_use]
    pub fn ticker_starts(&self) -> usize {
        self.ticker_starts
    }

    /// Number of times a running ticker was cancelled.
    #[must_use]
    pub fn ticker_cancels(&self) -> usize {
        self.ticker_cancels
    }
}

impl Scheduler for ManualScheduler {
    fn start_ticker(&mut self, token: TickToken) {
        self.ticker = Some(token);
        self.ticker_starts += 1;
    }

    fn cancel_ticker(&mut self) {
        if self.ticker.take().is_some() {
            self.ticker_cancels += 1;
        }
    }

    fn schedule_expiry(&mut self, token: MessageToken, delay: Duration) {
        self.pending_expiry = Some((token, delay));
    }

    fn cancel_expiry(&mut self) {
        self.pending_expiry = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
