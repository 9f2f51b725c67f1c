//! Event handling for menu bar interactions.
//!
//! This module handles:
//! - Mapping menu item clicks to actions
//! - Converting actions into engine commands
//! - The update messages sent from the engine side to the tray
//!
//! The event types and command mapping are platform-independent.

use std::fmt;

use crate::engine::{Command, MenuState, StopSource};

// ============================================================================
// MenuAction
// ============================================================================

/// Actions that can be triggered from the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Bring the main window forward (status item click or "Show App")
    ShowApp,
    /// Pause or resume the run
    TogglePause,
    /// Stop the run without announcement
    Stop,
    /// Quit the app
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::ShowApp => write!(f, "show_app"),
            MenuAction::TogglePause => write!(f, "toggle_pause"),
            MenuAction::Stop => write!(f, "stop"),
            MenuAction::Quit => write!(f, "quit"),
        }
    }
}

impl MenuAction {
    /// Returns the engine command for this action.
    pub fn to_command(&self) -> Command {
        match self {
            MenuAction::ShowApp => Command::ShowMainWindow,
            MenuAction::TogglePause => Command::TogglePause,
            MenuAction::Stop => Command::Stop(StopSource::Menu),
            MenuAction::Quit => Command::Quit,
        }
    }
}

// ============================================================================
// MenuItemId
// ============================================================================

/// Identifiers for menu items.
///
/// On macOS these are used as the tray-icon menu ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    ShowApp,
    TogglePause,
    Stop,
    Quit,
    /// Unknown or unhandled menu item
    Unknown,
}

impl MenuItemId {
    /// Returns the string id registered with the native menu.
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItemId::ShowApp => "show_app",
            MenuItemId::TogglePause => "toggle_pause",
            MenuItemId::Stop => "stop",
            MenuItemId::Quit => "quit",
            MenuItemId::Unknown => "unknown",
        }
    }

    /// Parses a native menu id.
    pub fn from_id(id: &str) -> Self {
        match id {
            "show_app" => MenuItemId::ShowApp,
            "toggle_pause" => MenuItemId::TogglePause,
            "stop" => MenuItemId::Stop,
            "quit" => MenuItemId::Quit,
            _ => MenuItemId::Unknown,
        }
    }

    /// Converts a menu item ID to the corresponding action.
    pub fn to_action(&self) -> Option<MenuAction> {
        match self {
            MenuItemId::ShowApp => Some(MenuAction::ShowApp),
            MenuItemId::TogglePause => Some(MenuAction::TogglePause),
            MenuItemId::Stop => Some(MenuAction::Stop),
            MenuItemId::Quit => Some(MenuAction::Quit),
            MenuItemId::Unknown => None,
        }
    }
}

// ============================================================================
// EventHandler
// ============================================================================

/// Handles menu events and converts them to actions.
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    /// Creates a new EventHandler.
    pub fn new() -> Self {
        Self
    }

    /// Processes a menu item click and returns the corresponding action.
    pub fn handle_click(&self, item_id: MenuItemId) -> Option<MenuAction> {
        let action = item_id.to_action();

        match action {
            Some(ref action) => tracing::info!(action = %action, "menu action received"),
            None => tracing::debug!(id = item_id.as_str(), "unhandled menu item"),
        }

        action
    }

    /// Processes a click on the status item itself.
    pub fn handle_status_item_click(&self) -> MenuAction {
        tracing::debug!("status item clicked");
        MenuAction::ShowApp
    }
}

// ============================================================================
// TrayUpdate
// ============================================================================

/// Updates sent to the tray from the engine side.
///
/// The engine runs inside tokio; the tray lives on the main thread and
/// drains these through a crossbeam channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// Install the status item
    Show,
    /// Remove the status item
    Remove,
    /// Update the clock (`HH:MM:SS`) shown in the title
    SetTitle(String),
    /// Rebuild the menu for a new state
    SetMenuState(MenuState),
}

// ============================================================================
// Tests
// ============================================================================
