//! Display utilities for the TimeMeUp CLI.
//!
//! This module formats:
//! - The status line rendered on every state change
//! - Startup and error messages

use crate::engine::Snapshot;
use crate::types::{CountDirection, Surface, TimerState};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats a snapshot as one status line.
    ///
    /// ```text
    /// [running]   00:04:59 / 00:05:00 ↓  0%  Menu Bar
    /// [completed] 00:00:00 / 00:00:05 ↓ 100% Always on Top  (overlay: done)  » Timer completed!
    /// ```
    pub fn status_line(snapshot: &Snapshot) -> String {
        let mut line = format!(
            "{:<11} {} / {} {} {:>3}%  {}",
            format!("[{}]", snapshot.state.as_str()),
            snapshot.clock,
            snapshot.target,
            Self::direction_arrow(&snapshot.state),
            snapshot.progress_percent,
            snapshot.mode.label(),
        );

        match snapshot.surface {
            Surface::FullInterface => {}
            Surface::Overlay => line.push_str("  (overlay)"),
            Surface::OverlayCompleted => line.push_str("  (overlay: done)"),
        }
        if !snapshot.sound_enabled {
            line.push_str("  [muted]");
        }
        if snapshot.notice.dock_badge {
            line.push_str("  [badge]");
        }
        if let Some(message) = &snapshot.notice.message {
            line.push_str("  » ");
            line.push_str(&message.text);
        }

        line
    }

    /// Formats the startup banner.
    pub fn welcome(snapshot: &Snapshot) -> String {
        format!(
            "TimeMeUp: {} mode, type 'help' for commands, Ctrl-C to quit",
            snapshot.mode.label()
        )
    }

    /// Formats an error message.
    pub fn error(message: &str) -> String {
        format!("error: {}", message)
    }

    fn direction_arrow(state: &TimerState) -> &'static str {
        match state.direction() {
            Some(CountDirection::Up) => "↑",
            Some(CountDirection::Down) => "↓",
            None => " ",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
