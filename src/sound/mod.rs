//! Sound playback for timer completion.
//!
//! This module provides:
//!
//! - System sound discovery (the "Glass" sound is preferred)
//! - A synthesized beep when no system sound is usable
//! - Non-blocking playback through rodio
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ CompletionSound  │ ← What the shell calls
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundPlayer    │────▶│  System Sounds   │
//! │                  │     │  (/System/...)   │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Sine-wave beep  │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```

mod error;
mod player;
mod source;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{
    discover_sounds_in, discover_system_sounds, find_system_sound, get_default_sound,
    pick_completion_sound, SoundSource,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

/// Trait for sound playback implementations.
pub trait SoundPlayer {
    /// Plays a sound from the given source without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

// ============================================================================
// CompletionSound
// ============================================================================

/// The completion sound: a resolved source plus an optional player.
///
/// Without a player (no audio device) every `play` is a logged no-op.
pub struct CompletionSound {
    player: Option<Box<dyn SoundPlayer>>,
    source: SoundSource,
}

impl CompletionSound {
    /// Creates a completion sound from a player and source.
    pub fn new(player: Option<Box<dyn SoundPlayer>>, source: SoundSource) -> Self {
        Self { player, source }
    }

    /// Opens the default audio device and picks the system completion sound.
    pub fn detect() -> Self {
        let player = try_create_player().map(|p| Box::new(p) as Box<dyn SoundPlayer>);
        let source = get_default_sound();
        debug!(sound = source.name(), audio = player.is_some(), "completion sound resolved");
        Self::new(player, source)
    }

    /// A completion sound that never plays.
    pub fn silent() -> Self {
        Self::new(None, SoundSource::Beep)
    }

    /// Returns the resolved source.
    #[must_use]
    pub fn source(&self) -> &SoundSource {
        &self.source
    }

    /// Returns true if an audio device is available.
    #[must_use]
    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    /// Plays the sound, logging any failure.
    pub fn play(&self) {
        let Some(player) = &self.player else {
            debug!("no audio device, completion sound skipped");
            return;
        };
        if let Err(e) = player.play(&self.source) {
            warn!(error = %e, sound = self.source.name(), "completion sound failed");
        }
    }
}

impl std::fmt::Debug for CompletionSound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSound")
            .field("source", &self.source)
            .field("has_player", &self.has_player())
            .finish()
    }
}

// ============================================================================
// MockSoundPlayer
// ============================================================================

/// Mock sound player for testing.
///
/// Clones share their recorded calls, so a test can keep one clone and hand
/// the other to a `CompletionSound`.
#[derive(Debug, Clone, Default)]
pub struct MockSoundPlayer {
    play_calls: Arc<Mutex<Vec<SoundSource>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("mock failure".to_string()));
        }
        self.play_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(source.clone());
        Ok(())
    }
}
