//! Title management for the status item.
//!
//! This module handles:
//! - Generating the status item title (e.g., "⏱️ 00:14:30")
//! - Skipping redundant title updates
//!
//! The text generation logic is platform-independent and fully testable.

use crate::types::format_time;

// ============================================================================
// Constants
// ============================================================================

/// Emoji shown before the clock
const TIMER_EMOJI: &str = "⏱️";

// ============================================================================
// IconManager
// ============================================================================

/// Manages title generation for the status item.
#[derive(Debug, Default)]
pub struct IconManager {
    /// Last title pushed to the tray
    last_title: Option<String>,
}

impl IconManager {
    /// Creates a new IconManager.
    pub fn new() -> Self {
        Self { last_title: None }
    }

    /// Generates the title from a formatted clock.
    ///
    /// # Examples
    ///
    /// ```
    /// use timemeup::menubar::icon::IconManager;
    ///
    /// let manager = IconManager::new();
    /// assert_eq!(manager.generate_title("00:05:00"), "⏱️ 00:05:00");
    /// ```
    pub fn generate_title(&self, clock_text: &str) -> String {
        format!("{} {}", TIMER_EMOJI, clock_text)
    }

    /// Generates the title from a clock value in seconds.
    pub fn title_for_seconds(&self, seconds: u32) -> String {
        self.generate_title(&format_time(seconds))
    }

    /// Checks if the title differs from the last one seen, remembering it.
    pub fn title_changed(&mut self, title: &str) -> bool {
        let changed = self.last_title.as_deref() != Some(title);
        if changed {
            self.last_title = Some(title.to_string());
        }
        changed
    }

    /// Forgets the last title, so the next update is always applied.
    pub fn reset(&mut self) {
        self.last_title = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
