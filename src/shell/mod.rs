//! The UI collaborator the timer engine drives.
//!
//! The engine owns all timer logic; everything visible (window placement,
//! status-bar text, dock badge, banner, sound) is requested through the
//! `Shell` trait. This module provides:
//!
//! - `Shell`: the contract
//! - `MockShell`: records every call, for tests
//! - `ConsoleShell`: terminal rendering plus the native menu bar, dock badge
//!   and sound where available

pub mod appkit;
pub mod console;

pub use console::{ConsoleShell, OutputFormat, WindowPlacement};

use crate::engine::Snapshot;
use crate::types::WindowLevel;

/// Trait for the UI layer that surfaces timer effects.
pub trait Shell {
    /// Shows a banner message. Completion banners are not auto-dismissed.
    fn show_transient_message(&mut self, text: &str, is_completion: bool);

    /// Hides the banner.
    fn clear_transient_message(&mut self);

    /// Plays the completion sound.
    fn play_completion_sound(&mut self);

    /// Shows or hides the dock badge.
    fn set_dock_badge(&mut self, visible: bool);

    /// Sets the clock text of the status item.
    fn set_status_bar_text(&mut self, text: &str);

    /// Rebuilds the status item's menu.
    fn set_menu_state(&mut self, active: bool, paused: bool);

    /// Installs the status item (no-op if already installed).
    fn show_status_item(&mut self);

    /// Removes the status item (no-op if absent).
    fn remove_status_item(&mut self);

    /// Sets the stacking level of the main window.
    fn set_window_level(&mut self, level: WindowLevel);

    /// Orders the main window to the front and activates the app.
    fn bring_window_forward(&mut self);

    /// Orders the main window behind other windows.
    fn send_window_back(&mut self);

    /// Lets the window follow the user across spaces and full-screen apps.
    fn set_collection_behavior(&mut self, joins_all_spaces: bool);

    /// Switches the overlay between its clock and its completion card.
    fn set_overlay_completed(&mut self, completed: bool);

    /// Re-renders the view after a state change.
    fn refresh(&mut self, _snapshot: &Snapshot) {}
}

// ============================================================================
// MockShell
// ============================================================================

/// One recorded shell call.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCall {
    ShowMessage { text: String, is_completion: bool },
    ClearMessage,
    PlaySound,
    SetDockBadge(bool),
    SetStatusBarText(String),
    SetMenuState { active: bool, paused: bool },
    ShowStatusItem,
    RemoveStatusItem,
    SetWindowLevel(WindowLevel),
    BringWindowForward,
    SendWindowBack,
    SetCollectionBehavior(bool),
    SetOverlayCompleted(bool),
}

/// Shell that records calls for assertions.
#[derive(Debug, Default)]
pub struct MockShell {
    calls: Vec<ShellCall>,
    last_snapshot: Option<Snapshot>,
    refresh_count: usize,
}

impl MockShell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in order.
    #[must_use]
    pub fn calls(&self) -> &[ShellCall] {
        &self.calls
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls equal to `call`.
    #[must_use]
    pub fn count(&self, call: &ShellCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Returns true if `call` was recorded.
    #[must_use]
    pub fn has(&self, call: &ShellCall) -> bool {
        self.count(call) > 0
    }

    /// Texts of every banner shown, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ShellCall::ShowMessage { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of sounds played.
    #[must_use]
    pub fn sound_count(&self) -> usize {
        self.count(&ShellCall::PlaySound)
    }

    /// Current dock badge according to the last badge call.
    #[must_use]
    pub fn dock_badge(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ShellCall::SetDockBadge(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Last status-bar text set.
    #[must_use]
    pub fn status_bar_text(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            ShellCall::SetStatusBarText(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Last menu state set, as `(active, paused)`.
    #[must_use]
    pub fn menu_state(&self) -> Option<(bool, bool)> {
        self.calls.iter().rev().find_map(|c| match c {
            ShellCall::SetMenuState { active, paused } => Some((*active, *paused)),
            _ => None,
        })
    }

    /// Last window level set.
    #[must_use]
    pub fn window_level(&self) -> Option<WindowLevel> {
        self.calls.iter().rev().find_map(|c| match c {
            ShellCall::SetWindowLevel(level) => Some(*level),
            _ => None,
        })
    }

    /// Snapshot passed to the last refresh.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Number of refreshes.
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }
}

impl Shell for MockShell {
    fn show_transient_message(&mut self, text: &str, is_completion: bool) {
        self.calls.push(ShellCall::ShowMessage {
            text: text.to_string(),
            is_completion,
        });
    }

    fn clear_transient_message(&mut self) {
        self.calls.push(ShellCall::ClearMessage);
    }

    fn play_completion_sound(&mut self) {
        self.calls.push(ShellCall::PlaySound);
    }

    fn set_dock_badge(&mut self, visible: bool) {
        self.calls.push(ShellCall::SetDockBadge(visible));
    }

    fn set_status_bar_text(&mut self, text: &str) {
        self.calls.push(ShellCall::SetStatusBarText(text.to_string()));
    }

    fn set_menu_state(&mut self, active: bool, paused: bool) {
        self.calls.push(ShellCall::SetMenuState { active, paused });
    }

    fn show_status_item(&mut self) {
        self.calls.push(ShellCall::ShowStatusItem);
    }

    fn remove_status_item(&mut self) {
        self.calls.push(ShellCall::RemoveStatusItem);
    }

    fn set_window_level(&mut self, level: WindowLevel) {
        self.calls.push(ShellCall::SetWindowLevel(level));
    }

    fn bring_window_forward(&mut self) {
        self.calls.push(ShellCall::BringWindowForward);
    }

    fn send_window_back(&mut self) {
        self.calls.push(ShellCall::SendWindowBack);
    }

    fn set_collection_behavior(&mut self, joins_all_spaces: bool) {
        self.calls
            .push(ShellCall::SetCollectionBehavior(joins_all_spaces));
    }

    fn set_overlay_completed(&mut self, completed: bool) {
        self.calls.push(ShellCall::SetOverlayCompleted(completed));
    }

    fn refresh(&mut self, snapshot: &Snapshot) {
        self.last_snapshot = Some(snapshot.clone());
        self.refresh_count += 1;
    }
}
