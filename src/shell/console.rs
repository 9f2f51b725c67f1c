//! Terminal shell.
//!
//! Renders the timer to a writer (stdout in the app) and forwards menu-bar,
//! dock and sound effects to their native backends:
//!
//! - Status item updates go to the tray over a crossbeam channel
//! - The dock badge goes through AppKit
//! - The completion sound goes through rodio

use std::io::{self, Stdout, Write};

use crossbeam_channel::Sender;
use serde::Serialize;
use tracing::{debug, warn};

use super::{appkit, Shell};
use crate::cli::Display;
use crate::engine::Snapshot;
use crate::menubar::TrayUpdate;
use crate::sound::CompletionSound;
use crate::types::WindowLevel;

/// How snapshots are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One human-readable status line per change
    #[default]
    Text,
    /// One JSON object per change
    Json,
}

/// Placement of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WindowPlacement {
    pub level: WindowLevel,
    pub joins_all_spaces: bool,
    /// Ordered in front of other windows
    pub in_front: bool,
}

/// Shell that prints to a terminal.
pub struct ConsoleShell<W: Write = Stdout> {
    out: W,
    format: OutputFormat,
    sound: CompletionSound,
    tray_tx: Option<Sender<TrayUpdate>>,
    window: WindowPlacement,
    last_output: Option<String>,
}

impl ConsoleShell<Stdout> {
    /// Creates a shell printing to stdout.
    pub fn stdout(
        format: OutputFormat,
        sound: CompletionSound,
        tray_tx: Option<Sender<TrayUpdate>>,
    ) -> Self {
        Self::with_writer(io::stdout(), format, sound, tray_tx)
    }
}

impl<W: Write> ConsoleShell<W> {
    /// Creates a shell printing to the given writer.
    pub fn with_writer(
        out: W,
        format: OutputFormat,
        sound: CompletionSound,
        tray_tx: Option<Sender<TrayUpdate>>,
    ) -> Self {
        Self {
            out,
            format,
            sound,
            tray_tx,
            window: WindowPlacement {
                in_front: true,
                ..WindowPlacement::default()
            },
            last_output: None,
        }
    }

    /// Returns the current window placement.
    pub fn window(&self) -> WindowPlacement {
        self.window
    }

    /// Returns the writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Writes a line of text regardless of the output format.
    pub fn print_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|()| self.out.flush()) {
            warn!(error = %e, "failed to write output");
        }
    }

    fn render(&self, snapshot: &Snapshot) -> Option<String> {
        match self.format {
            OutputFormat::Text => Some(Display::status_line(snapshot)),
            OutputFormat::Json => match serde_json::to_string(snapshot) {
                Ok(json) => Some(json),
                Err(e) => {
                    warn!(error = %e, "failed to serialize snapshot");
                    None
                }
            },
        }
    }

    fn send_tray(&self, update: TrayUpdate) {
        let Some(tx) = &self.tray_tx else {
            return;
        };
        if tx.send(update).is_err() {
            warn!("tray update channel closed");
        }
    }
}

impl<W: Write> Shell for ConsoleShell<W> {
    fn show_transient_message(&mut self, text: &str, is_completion: bool) {
        debug!(text, is_completion, "message shown");
    }

    fn clear_transient_message(&mut self) {
        debug!("message cleared");
    }

    fn play_completion_sound(&mut self) {
        self.sound.play();
    }

    fn set_dock_badge(&mut self, visible: bool) {
        appkit::set_dock_badge(visible);
    }

    fn set_status_bar_text(&mut self, text: &str) {
        self.send_tray(TrayUpdate::SetTitle(text.to_string()));
    }

    fn set_menu_state(&mut self, active: bool, paused: bool) {
        self.send_tray(TrayUpdate::SetMenuState(crate::engine::MenuState {
            active,
            paused,
        }));
    }

    fn show_status_item(&mut self) {
        self.send_tray(TrayUpdate::Show);
    }

    fn remove_status_item(&mut self) {
        self.send_tray(TrayUpdate::Remove);
    }

    fn set_window_level(&mut self, level: WindowLevel) {
        self.window.level = level;
    }

    fn bring_window_forward(&mut self) {
        self.window.in_front = true;
        appkit::activate();
    }

    fn send_window_back(&mut self) {
        self.window.in_front = false;
    }

    fn set_collection_behavior(&mut self, joins_all_spaces: bool) {
        self.window.joins_all_spaces = joins_all_spaces;
    }

    fn set_overlay_completed(&mut self, completed: bool) {
        debug!(completed, "overlay completion card");
    }

    fn refresh(&mut self, snapshot: &Snapshot) {
        let Some(output) = self.render(snapshot) else {
            return;
        };
        if self.last_output.as_deref() == Some(output.as_str()) {
            return;
        }
        self.print_line(&output);
        self.last_output = Some(output);
    }
}

impl<W: Write> std::fmt::Debug for ConsoleShell<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleShell")
            .field("format", &self.format)
            .field("sound", &self.sound)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
