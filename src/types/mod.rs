//! Core data types for the timer.
//!
//! This module defines the data structures used for:
//! - Timer configuration and time input clamping
//! - Timer state (idle / running / completed)
//! - Display modes and the surface the view should render
//! - Clock formatting and progress

use serde::{Deserialize, Serialize};

// ============================================================================
// Limits
// ============================================================================

/// Largest value accepted for the hours field.
pub const MAX_HOURS: u32 = 23;

/// Largest value accepted for the minutes field.
pub const MAX_MINUTES: u32 = 59;

/// Largest value accepted for the seconds field.
pub const MAX_SECONDS: u32 = 59;

// ============================================================================
// CountDirection
// ============================================================================

/// Direction in which the clock moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountDirection {
    /// Clock starts at the target and runs down to zero
    #[default]
    Down,
    /// Clock starts at zero and runs up to the target
    Up,
}

impl CountDirection {
    /// Returns the clock value a fresh run starts from.
    pub fn initial_clock(&self, target: u32) -> u32 {
        match self {
            CountDirection::Down => target,
            CountDirection::Up => 0,
        }
    }

    /// Returns the clock value at which a run completes.
    pub fn final_clock(&self, target: u32) -> u32 {
        match self {
            CountDirection::Down => 0,
            CountDirection::Up => target,
        }
    }
}

// ============================================================================
// DisplayMode
// ============================================================================

/// Where the running timer is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Regular application window
    Window,
    /// Floating overlay that stays above other windows
    OnTop,
    /// Status-bar item with a dropdown menu
    #[default]
    MenuBar,
}

impl DisplayMode {
    /// All display modes, in the order the picker lists them.
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Window,
        DisplayMode::OnTop,
        DisplayMode::MenuBar,
    ];

    /// Returns the label shown in the display picker.
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Window => "App Window",
            DisplayMode::OnTop => "Always on Top",
            DisplayMode::MenuBar => "Menu Bar",
        }
    }
}

// ============================================================================
// WindowLevel
// ============================================================================

/// Stacking level of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowLevel {
    #[default]
    Normal,
    Floating,
}

// ============================================================================
// TimeInput
// ============================================================================

/// Hours / minutes / seconds as entered by the user.
///
/// Every constructor clamps to the field ranges, so a `TimeInput` is always
/// within `0-23 : 0-59 : 0-59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeInput {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeInput {
    /// Creates a time input, clamping each field to its range.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours: hours.min(MAX_HOURS),
            minutes: minutes.min(MAX_MINUTES),
            seconds: seconds.min(MAX_SECONDS),
        }
    }

    /// Parses the three text fields of the time entry form.
    pub fn from_fields(hours: &str, minutes: &str, seconds: &str) -> Self {
        Self {
            hours: parse_field(hours, MAX_HOURS),
            minutes: parse_field(minutes, MAX_MINUTES),
            seconds: parse_field(seconds, MAX_SECONDS),
        }
    }

    /// Total duration in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    /// Returns true if any field is non-zero.
    pub fn has_time_set(&self) -> bool {
        self.total_seconds() > 0
    }
}

/// Parses one time field.
///
/// Empty or non-numeric text becomes 0; numbers outside `0..=max` are clamped.
pub fn parse_field(text: &str, max: u32) -> u32 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }
    match text.parse::<i64>() {
        Ok(value) => value.clamp(0, i64::from(max)) as u32,
        Err(_) => 0,
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Configuration for one timer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Run length in seconds
    pub duration_seconds: u32,
    /// Count direction
    pub direction: CountDirection,
}

impl TimerConfig {
    /// Creates a configuration from a time input.
    pub fn new(input: TimeInput, direction: CountDirection) -> Self {
        Self {
            duration_seconds: input.total_seconds(),
            direction,
        }
    }

    /// Creates a configuration from raw hours, minutes and seconds (clamped).
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32, direction: CountDirection) -> Self {
        Self::new(TimeInput::new(hours, minutes, seconds), direction)
    }

    /// Returns true if the configuration can start a run.
    pub fn is_startable(&self) -> bool {
        self.duration_seconds > 0
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// State of the single timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimerState {
    /// No run in progress
    #[default]
    Idle,
    /// A run is in progress
    Running {
        /// Clock value: remaining seconds when counting down, elapsed when counting up
        clock: u32,
        /// Run length in seconds
        target: u32,
        direction: CountDirection,
        paused: bool,
    },
    /// The last run reached its end
    Completed {
        /// Clock value at the moment of completion
        clock: u32,
        target: u32,
        direction: CountDirection,
    },
}

impl TimerState {
    /// Starts a fresh run for the given configuration.
    pub fn running(config: &TimerConfig) -> Self {
        TimerState::Running {
            clock: config.direction.initial_clock(config.duration_seconds),
            target: config.duration_seconds,
            direction: config.direction,
            paused: false,
        }
    }

    /// Returns the current clock value (0 when idle).
    pub fn clock(&self) -> u32 {
        match self {
            TimerState::Idle => 0,
            TimerState::Running { clock, .. } | TimerState::Completed { clock, .. } => *clock,
        }
    }

    /// Returns the run length (0 when idle).
    pub fn target(&self) -> u32 {
        match self {
            TimerState::Idle => 0,
            TimerState::Running { target, .. } | TimerState::Completed { target, .. } => *target,
        }
    }

    /// Returns the count direction of the current or last run.
    pub fn direction(&self) -> Option<CountDirection> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { direction, .. } | TimerState::Completed { direction, .. } => {
                Some(*direction)
            }
        }
    }

    /// Seconds elapsed since the run started.
    pub fn elapsed(&self) -> u32 {
        match self.direction() {
            Some(CountDirection::Down) => self.target().saturating_sub(self.clock()),
            Some(CountDirection::Up) => self.clock(),
            None => 0,
        }
    }

    /// Seconds left until the run completes.
    pub fn remaining(&self) -> u32 {
        match self.direction() {
            Some(CountDirection::Down) => self.clock(),
            Some(CountDirection::Up) => self.target().saturating_sub(self.clock()),
            None => 0,
        }
    }

    /// Returns true while a run is in progress, paused or not.
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    /// Returns true while a run is in progress and paused.
    pub fn is_paused(&self) -> bool {
        matches!(self, TimerState::Running { paused: true, .. })
    }

    /// Returns true once a run has reached its end.
    pub fn is_completed(&self) -> bool {
        matches!(self, TimerState::Completed { .. })
    }

    /// Returns true if ticks currently move the clock.
    pub fn is_ticking(&self) -> bool {
        matches!(self, TimerState::Running { paused: false, .. })
    }

    /// Fraction of the run shown by the progress bar.
    pub fn progress(&self) -> f64 {
        progress(self.clock(), self.target())
    }

    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running { paused: false, .. } => "running",
            TimerState::Running { paused: true, .. } => "paused",
            TimerState::Completed { .. } => "completed",
        }
    }
}

// ============================================================================
// Surface
// ============================================================================

/// Which view the main window renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Inputs (when idle) or the in-window clock (when running)
    FullInterface,
    /// Compact clock with pause/stop, while running on top
    Overlay,
    /// Completion card with a reset button, after finishing on top
    OverlayCompleted,
}

impl Surface {
    /// Selects the surface for the given state.
    pub fn select(state: &TimerState, mode: DisplayMode, overlay_just_completed: bool) -> Self {
        if mode != DisplayMode::OnTop {
            return Surface::FullInterface;
        }
        if state.is_running() {
            Surface::Overlay
        } else if overlay_just_completed {
            Surface::OverlayCompleted
        } else {
            Surface::FullInterface
        }
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats seconds as `HH:MM:SS`.
pub fn format_time(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Progress fraction for a clock value, clamped to `[0, 1]`.
///
/// The clock holds the remaining time when counting down and the elapsed time
/// when counting up, so this is `remaining / target` or `elapsed / target`.
pub fn progress(clock: u32, target: u32) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (f64::from(clock) / f64::from(target)).clamp(0.0, 1.0)
}

/// Progress as a truncated integer percentage.
pub fn progress_percent(progress: f64) -> u32 {
    (progress * 100.0) as u32
}

// ============================================================================
// Tests
// ============================================================================
