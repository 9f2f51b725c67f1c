//! Menu bar UI module for the timer.
//!
//! This module provides:
//! - Status item management for the macOS menu bar
//! - Clock title (e.g., "⏱️ 00:14:30")
//! - Dropdown menu with Show App / Pause / Resume / Stop Timer / Quit
//! - Event handling for menu interactions
//!
//! # Architecture
//!
//! The module is split into platform-independent and platform-specific parts:
//!
//! - `icon.rs`: Title text generation (platform-independent, fully testable)
//! - `menu.rs`: Menu configuration (platform-independent, fully testable)
//! - `event.rs`: Event types and handling (platform-independent, fully testable)
//! - `mod.rs`: TrayIconManager (platform-specific on macOS)
//!
//! # Usage
//!
//! The shell sends `TrayUpdate`s over a crossbeam channel; the app loop calls
//! `process_all_updates` and `poll_actions` on the main thread.
//!
//! ```ignore
//! use timemeup::menubar::{TrayIconManager, TrayUpdate};
//! use crossbeam_channel::unbounded;
//!
//! let (tx, rx) = unbounded();
//! let mut manager = TrayIconManager::new(rx);
//!
//! tx.send(TrayUpdate::Show)?;
//! tx.send(TrayUpdate::SetTitle("00:15:30".to_string()))?;
//! manager.process_all_updates();
//! ```

pub mod event;
pub mod icon;
pub mod menu;

// Re-export main types
pub use event::{EventHandler, MenuAction, MenuItemId, TrayUpdate};
pub use icon::IconManager;
pub use menu::{MenuBuilder, MenuConfig, MenuItemConfig};

use crate::engine::MenuState;
use crossbeam_channel::Receiver;

// ============================================================================
// TrayIconManager
// ============================================================================

/// Manages the status item and its menu.
///
/// On macOS, it owns the actual tray-icon instance while the status item is
/// installed. On other platforms, it only tracks state.
pub struct TrayIconManager {
    /// Icon manager for title generation
    icon_manager: IconManager,
    /// Menu builder for menu configuration
    menu_builder: MenuBuilder,
    /// Event handler for menu clicks
    event_handler: EventHandler,
    /// Channel for receiving updates from the shell
    update_rx: Receiver<TrayUpdate>,
    /// Current title
    title: String,
    /// Current menu state
    menu_state: MenuState,
    /// Whether the status item is installed
    visible: bool,
    /// Platform-specific tray icon instance (macOS only)
    #[cfg(target_os = "macos")]
    tray_icon: Option<tray_icon::TrayIcon>,
}

impl TrayIconManager {
    /// Creates a new TrayIconManager with no status item installed.
    pub fn new(update_rx: Receiver<TrayUpdate>) -> Self {
        let icon_manager = IconManager::new();
        let title = icon_manager.title_for_seconds(0);

        Self {
            icon_manager,
            menu_builder: MenuBuilder::new(),
            event_handler: EventHandler::new(),
            update_rx,
            title,
            menu_state: MenuState::default(),
            visible: false,
            #[cfg(target_os = "macos")]
            tray_icon: None,
        }
    }

    /// Returns whether the status item is installed.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the current title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the current menu state.
    pub fn menu_state(&self) -> MenuState {
        self.menu_state
    }

    /// Generates the current menu configuration.
    pub fn menu_config(&self) -> MenuConfig {
        self.menu_builder.build(self.menu_state)
    }

    /// Processes a pending update from the channel.
    ///
    /// Returns `true` if an update was processed, `false` if the channel was empty.
    pub fn process_pending_update(&mut self) -> bool {
        match self.update_rx.try_recv() {
            Ok(update) => {
                self.handle_update(update);
                true
            }
            Err(crossbeam_channel::TryRecvError::Empty) => false,
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                tracing::warn!("tray update channel disconnected");
                false
            }
        }
    }

    /// Processes every pending update. Returns how many were applied.
    pub fn process_all_updates(&mut self) -> usize {
        let mut count = 0;
        while self.process_pending_update() {
            count += 1;
        }
        count
    }

    /// Handles an update from the shell.
    fn handle_update(&mut self, update: TrayUpdate) {
        match update {
            TrayUpdate::Show => {
                if let Err(e) = self.install() {
                    tracing::warn!(error = %e, "status item unavailable");
                }
            }
            TrayUpdate::Remove => self.remove(),
            TrayUpdate::SetTitle(clock_text) => {
                let title = self.icon_manager.generate_title(&clock_text);
                if self.icon_manager.title_changed(&title) {
                    tracing::debug!(title = %title, "status item title updated");
                    #[cfg(target_os = "macos")]
                    if let Some(ref tray_icon) = self.tray_icon {
                        tray_icon.set_title(Some(&title));
                    }
                    self.title = title;
                }
            }
            TrayUpdate::SetMenuState(state) => {
                tracing::debug!(active = state.active, paused = state.paused, "menu rebuilt");
                self.menu_state = state;
                #[cfg(target_os = "macos")]
                self.rebuild_menu();
            }
        }
    }

    /// Collects the actions triggered since the last poll.
    #[cfg(target_os = "macos")]
    pub fn poll_actions(&self) -> Vec<MenuAction> {
        use tray_icon::menu::MenuEvent;
        use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent};

        let mut actions = Vec::new();

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            let id = MenuItemId::from_id(event.id.0.as_str());
            if let Some(action) = self.event_handler.handle_click(id) {
                actions.push(action);
            }
        }

        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                actions.push(self.event_handler.handle_status_item_click());
            }
        }

        actions
    }

    /// Collects the actions triggered since the last poll (non-macOS, none).
    #[cfg(not(target_os = "macos"))]
    pub fn poll_actions(&self) -> Vec<MenuAction> {
        Vec::new()
    }

    /// Removes the status item.
    pub fn remove(&mut self) {
        if self.visible {
            tracing::info!("status item removed");
        }
        self.visible = false;
        self.icon_manager.reset();
        self.title = self.icon_manager.title_for_seconds(0);
        #[cfg(target_os = "macos")]
        {
            self.tray_icon = None;
        }
    }

    /// Removes the status item and resets the menu.
    pub fn shutdown(&mut self) {
        self.remove();
        self.menu_state = MenuState::default();
        tracing::info!("menu bar shut down");
    }

    /// Installs the status item (macOS only).
    ///
    /// Must be called from the main thread. Installing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the tray icon cannot be created.
    #[cfg(target_os = "macos")]
    pub fn install(&mut self) -> anyhow::Result<()> {
        use anyhow::Context;
        use tray_icon::TrayIconBuilder;

        if self.tray_icon.is_some() {
            return Ok(());
        }

        let menu = self.build_native_menu(&self.menu_config())?;

        let tray_icon = TrayIconBuilder::new()
            .with_title(&self.title)
            .with_menu(Box::new(menu))
            .with_tooltip("TimeMeUp")
            .build()
            .context("failed to create status item")?;

        self.tray_icon = Some(tray_icon);
        self.visible = true;

        tracing::info!("status item installed");
        Ok(())
    }

    /// Installs the status item (non-macOS, state only).
    #[cfg(not(target_os = "macos"))]
    pub fn install(&mut self) -> anyhow::Result<()> {
        if !self.visible {
            tracing::debug!("status item is only rendered on macOS");
        }
        self.visible = true;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn rebuild_menu(&mut self) {
        let Some(ref tray_icon) = self.tray_icon else {
            return;
        };
        match self.build_native_menu(&self.menu_config()) {
            Ok(menu) => tray_icon.set_menu(Some(Box::new(menu))),
            Err(e) => tracing::warn!(error = %e, "failed to rebuild menu"),
        }
    }

    /// Builds a native menu from the configuration (macOS only).
    #[cfg(target_os = "macos")]
    fn build_native_menu(&self, config: &MenuConfig) -> anyhow::Result<tray_icon::menu::Menu> {
        use tray_icon::menu::{Menu, MenuItem, PredefinedMenuItem};

        let native_item = |item: &MenuItemConfig| {
            MenuItem::with_id(item.id.as_str(), &item.text, item.enabled, None)
        };

        let menu = Menu::new();

        menu.append(&native_item(&config.show_app))?;

        if let (Some(toggle), Some(stop)) = (&config.toggle, &config.stop) {
            menu.append(&PredefinedMenuItem::separator())?;
            menu.append(&native_item(toggle))?;
            menu.append(&native_item(stop))?;
        }

        menu.append(&PredefinedMenuItem::separator())?;
        menu.append(&native_item(&config.quit))?;

        Ok(menu)
    }
}

impl std::fmt::Debug for TrayIconManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayIconManager")
            .field("visible", &self.visible)
            .field("title", &self.title)
            .field("menu_state", &self.menu_state)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
