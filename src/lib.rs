//! TimeMeUp Library
//!
//! A count-up / count-down timer with three display modes. It includes:
//! - Timer engine: the state machine, completion signalling and scheduling
//! - Shell seam: the abstract UI the engine drives, plus a terminal shell
//! - CLI parsing, line commands and display utilities
//! - Type definitions for time entry, configuration and state
//! - Menu bar UI with tray icon (macOS only)
//! - Sound playback for completion

pub mod app;
pub mod cli;
pub mod engine;
pub mod menubar;
pub mod shell;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    format_time, CountDirection, DisplayMode, Surface, TimeInput, TimerConfig, TimerState,
    WindowLevel,
};

// Re-export engine types
pub use engine::{
    Command, ManualScheduler, NotificationFlags, Scheduler, Snapshot, StopSource, TimerEngine,
    TimerError, TokioScheduler,
};

// Re-export shell types
pub use shell::{ConsoleShell, MockShell, OutputFormat, Shell, ShellCall};

// Re-export menubar types
pub use menubar::{
    EventHandler, IconManager, MenuAction, MenuBuilder, MenuConfig, MenuItemConfig, MenuItemId,
    TrayIconManager, TrayUpdate,
};

// Re-export sound types
pub use sound::{
    discover_system_sounds, get_default_sound, CompletionSound, MockSoundPlayer,
    RodioSoundPlayer, SoundError, SoundPlayer, SoundSource,
};
