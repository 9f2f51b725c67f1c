//! Timer engine module.
//!
//! The engine is the single owner of timer state. Everything that wants to
//! change it sends a `Command`; everything visible goes out through the
//! `Shell` trait; everything deferred goes through the `Scheduler` trait.

pub mod command;
pub mod error;
pub mod notice;
pub mod scheduler;
pub mod timer;

pub use command::{Command, MessageToken, StopSource, TickToken};
pub use error::TimerError;
pub use notice::{
    FlashMessage, MenuState, MessageKind, NotificationFlags, COMPLETED_MESSAGE, MESSAGE_TIMEOUT,
    STOPPED_MESSAGE,
};
pub use scheduler::{ManualScheduler, Scheduler, TokioScheduler, TICK_INTERVAL};
pub use timer::{Snapshot, TimerEngine};
