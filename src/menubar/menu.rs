//! Menu building for the status item.
//!
//! This module handles:
//! - Menu item configuration and state
//! - Deciding which entries appear for the current menu state
//!
//! The configuration logic is platform-independent and fully testable.
//! Actual menu creation using tray-icon is done in the platform-specific code.

use super::event::MenuItemId;
use crate::engine::MenuState;

// ============================================================================
// MenuItemConfig
// ============================================================================

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    /// Identifier used to route clicks
    pub id: MenuItemId,
    /// Display text for the menu item
    pub text: String,
    /// Whether the menu item is enabled (clickable)
    pub enabled: bool,
}

impl MenuItemConfig {
    /// Creates a new enabled menu item configuration.
    pub fn new(id: MenuItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            enabled: true,
        }
    }
}

// ============================================================================
// MenuConfig
// ============================================================================

/// Complete menu configuration for one menu state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// "Show App" (always present)
    pub show_app: MenuItemConfig,
    /// "Pause" or "Resume" (only while a run is active)
    pub toggle: Option<MenuItemConfig>,
    /// "Stop Timer" (only while a run is active)
    pub stop: Option<MenuItemConfig>,
    /// "Quit" (always present)
    pub quit: MenuItemConfig,
}

impl MenuConfig {
    /// Returns true if the run controls are shown.
    pub fn has_run_controls(&self) -> bool {
        self.toggle.is_some() && self.stop.is_some()
    }

    /// Returns the item texts in display order, separators omitted.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels = vec![self.show_app.text.as_str()];
        labels.extend(self.toggle.iter().map(|item| item.text.as_str()));
        labels.extend(self.stop.iter().map(|item| item.text.as_str()));
        labels.push(self.quit.text.as_str());
        labels
    }
}

// ============================================================================
// MenuBuilder
// ============================================================================

/// Builds menu configuration from the menu state.
#[derive(Debug, Default)]
pub struct MenuBuilder;

impl MenuBuilder {
    /// Creates a new MenuBuilder.
    pub fn new() -> Self {
        Self
    }

    /// Builds the menu for the given state.
    pub fn build(&self, state: MenuState) -> MenuConfig {
        let (toggle, stop) = if state.active {
            let label = if state.paused { "Resume" } else { "Pause" };
            (
                Some(MenuItemConfig::new(MenuItemId::TogglePause, label)),
                Some(MenuItemConfig::new(MenuItemId::Stop, "Stop Timer")),
            )
        } else {
            (None, None)
        };

        MenuConfig {
            show_app: MenuItemConfig::new(MenuItemId::ShowApp, "Show App"),
            toggle,
            stop,
            quit: MenuItemConfig::new(MenuItemId::Quit, "Quit"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
