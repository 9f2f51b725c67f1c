//! Sound player implementation using rodio.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;

/// Beep pitch in Hz.
const BEEP_FREQUENCY: f32 = 880.0;

/// Beep length.
const BEEP_DURATION: Duration = Duration::from_millis(300);

/// Beep volume (0.0 to 1.0).
const BEEP_VOLUME: f32 = 0.2;

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking; sounds continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Opens the default audio output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound from the given source.
    ///
    /// A system sound that cannot be opened or decoded falls back to the beep.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio stream rejects playback.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::System { path, name } => {
                debug!(sound = %name, "playing system sound");
                match self.play_file(path) {
                    Err(e) if e.should_fallback_to_beep() => {
                        warn!(sound = %name, error = %e, "falling back to beep");
                        self.play_beep()
                    }
                    result => result,
                }
            }
            SoundSource::Beep => self.play_beep(),
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();

        debug!("sound playback started (detached)");
        Ok(())
    }

    /// Plays the synthesized beep.
    fn play_beep(&self) -> Result<(), SoundError> {
        let beep = SineWave::new(BEEP_FREQUENCY)
            .take_duration(BEEP_DURATION)
            .amplify(BEEP_VOLUME);

        let sink = self.new_sink()?;
        sink.append(beep);
        sink.detach();

        debug!("beep started (detached)");
        Ok(())
    }

    /// Creates a sink on the output stream.
    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!(error = %e, "audio not available, completion sound disabled");
            None
        }
    }
}
