//! Commands delivered to the timer engine.
//!
//! Every control surface (terminal input, menu-bar menu, scheduled tasks)
//! talks to the engine by sending a `Command` over one channel, so the engine
//! is only ever mutated from the task that owns it.

use std::fmt;

use crate::types::{DisplayMode, TimerConfig};

/// Identifies one transient message so a late expiry can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageToken(pub u64);

/// Identifies one ticker so ticks queued before a cancel can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(pub u64);

/// Where a stop request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSource {
    /// Stop button in the window or overlay; announces "Timer stopped"
    Window,
    /// "Stop Timer" in the menu-bar menu; silent
    Menu,
}

impl StopSource {
    /// Returns true if stopping from this source shows a message.
    pub fn announces(&self) -> bool {
        matches!(self, StopSource::Window)
    }
}

/// A request to the timer engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a run with the given configuration
    Start(TimerConfig),
    /// Pause the running timer
    Pause,
    /// Resume the paused timer
    Resume,
    /// Pause if running, resume if paused
    TogglePause,
    /// Stop the run and return to idle
    Stop(StopSource),
    /// Dismiss the completed overlay and return to idle
    Reset,
    /// One second elapsed on the given ticker
    Tick(TickToken),
    /// A transient message reached its display deadline
    ExpireMessage(MessageToken),
    /// Switch the display mode
    SetDisplayMode(DisplayMode),
    /// Enable or disable the completion sound
    SetSound(bool),
    /// The app became the active application
    AppForeground,
    /// The app resigned active
    AppBackground,
    /// Status item clicked or "Show App" chosen
    ShowMainWindow,
    /// Shut the app down
    Quit,
}

impl Command {
    /// Returns true for commands produced by the scheduler rather than the user.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Command::Tick(_) | Command::ExpireMessage(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start(_) => write!(f, "start"),
            Command::Pause => write!(f, "pause"),
            Command::Resume => write!(f, "resume"),
            Command::TogglePause => write!(f, "toggle_pause"),
            Command::Stop(_) => write!(f, "stop"),
            Command::Reset => write!(f, "reset"),
            Command::Tick(_) => write!(f, "tick"),
            Command::ExpireMessage(_) => write!(f, "expire_message"),
            Command::SetDisplayMode(_) => write!(f, "set_display_mode"),
            Command::SetSound(_) => write!(f, "set_sound"),
            Command::AppForeground => write!(f, "app_foreground"),
            Command::AppBackground => write!(f, "app_background"),
            Command::ShowMainWindow => write!(f, "show_main_window"),
            Command::Quit => write!(f, "quit"),
        }
    }
}
