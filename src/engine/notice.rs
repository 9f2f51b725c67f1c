//! Transient messages and notification flags.
//!
//! Holds everything the UI derives from completion and error signalling:
//! - The flash message currently shown and how it ends
//! - Dock badge, persistent completion and overlay flags
//! - The pause/resume state mirrored into the menu-bar menu

use serde::Serialize;
use tokio::time::Duration;

use super::command::MessageToken;

/// How long a non-completion message stays on screen.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

/// Text shown when a run completes in the window or overlay.
pub const COMPLETED_MESSAGE: &str = "Timer completed!";

/// Text shown when the user stops a run from the window.
pub const STOPPED_MESSAGE: &str = "Timer stopped";

// ============================================================================
// FlashMessage
// ============================================================================

/// Kind of flash message, which decides how it is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Expires after `MESSAGE_TIMEOUT`
    Transient,
    /// Stays until foreground, reset or display-mode change
    Completion,
}

/// A message banner currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub text: String,
    pub kind: MessageKind,
    #[serde(skip)]
    pub token: MessageToken,
}

impl FlashMessage {
    /// Returns true for completion messages.
    pub fn is_completion(&self) -> bool {
        self.kind == MessageKind::Completion
    }
}

// ============================================================================
// MenuState
// ============================================================================

/// State of the menu-bar dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MenuState {
    /// Pause/resume and stop entries are shown
    pub active: bool,
    /// Pause entry reads "Resume"
    pub paused: bool,
}

// ============================================================================
// NotificationFlags
// ============================================================================

/// Transient UI signals derived from timer state and display mode.
///
/// Nothing here outlives the process; flags are recomputed or cleared on
/// every transition that touches them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationFlags {
    /// Banner on screen, if any
    pub message: Option<FlashMessage>,
    /// Dock badge shown
    pub dock_badge: bool,
    /// A menu-bar completion is waiting for the status item to be opened
    pub menu_bar_pending: bool,
    /// A window/overlay completion is waiting for acknowledgement
    pub persistent_completion: bool,
    /// The overlay shows its completion card
    pub overlay_just_completed: bool,
    /// Menu-bar dropdown state
    pub menu: MenuState,
    #[serde(skip)]
    next_token: u64,
}

impl NotificationFlags {
    /// Creates cleared flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the banner and returns its token.
    pub fn show_message(&mut self, text: impl Into<String>, kind: MessageKind) -> MessageToken {
        self.next_token += 1;
        let token = MessageToken(self.next_token);
        self.message = Some(FlashMessage {
            text: text.into(),
            kind,
            token,
        });
        token
    }

    /// Hides the banner if `token` still identifies a transient message.
    ///
    /// Returns true if the banner was hidden.
    pub fn expire(&mut self, token: MessageToken) -> bool {
        match &self.message {
            Some(message) if message.token == token && !message.is_completion() => {
                self.message = None;
                true
            }
            _ => false,
        }
    }

    /// Returns true if a completion banner is on screen.
    pub fn showing_completion(&self) -> bool {
        self.message.as_ref().is_some_and(FlashMessage::is_completion)
    }

    /// Returns the banner text, if any.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
