//! Sound source selection.
//!
//! The completion sound is the "Glass" system sound when present, another
//! system sound otherwise, and a synthesized beep as the last resort.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A macOS system sound from `/System/Library/Sounds/` or similar.
    System {
        /// The name of the sound (e.g., "Glass").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// A short synthesized tone.
    Beep,
}

impl SoundSource {
    /// Creates a new system sound source.
    #[must_use]
    pub fn system(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::System {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::System { name, .. } => name,
            Self::Beep => "beep",
        }
    }

    /// Returns true if this is a system sound.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }

    /// Returns the file path if this is a system sound.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::System { path, .. } => Some(path),
            Self::Beep => None,
        }
    }
}

/// Directories to search for system sounds, in order of priority.
const SYSTEM_SOUND_DIRS: &[&str] = &["/System/Library/Sounds", "/Library/Sounds"];

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["aiff", "wav", "mp3", "m4a", "flac"];

/// Sound names to try, in order of preference.
const PREFERRED_SOUND_NAMES: &[&str] = &["Glass", "Ping", "Pop", "Blow"];

/// Discovers available system sounds, sorted by name.
///
/// Returns an empty vector if no sounds are found.
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let dirs: Vec<&Path> = SYSTEM_SOUND_DIRS.iter().map(Path::new).collect();
    discover_sounds_in(&dirs)
}

/// Discovers sounds in the given directories, sorted by name.
#[must_use]
pub fn discover_sounds_in(dirs: &[&Path]) -> Vec<SoundSource> {
    let mut sounds = Vec::new();

    for dir in dirs {
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };

        for entry in entries.flatten() {
            let file_path = entry.path();
            let supported = file_path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
            if !supported {
                continue;
            }
            if let Some(stem) = file_path.file_stem() {
                sounds.push(SoundSource::System {
                    name: stem.to_string_lossy().into_owned(),
                    path: file_path,
                });
            }
        }
    }

    sounds.sort_by(|a, b| a.name().cmp(b.name()));
    sounds
}

/// Picks the completion sound from a list of candidates.
#[must_use]
pub fn pick_completion_sound(sounds: Vec<SoundSource>) -> SoundSource {
    for preferred_name in PREFERRED_SOUND_NAMES {
        if let Some(sound) = sounds.iter().find(|s| s.name() == *preferred_name) {
            return sound.clone();
        }
    }

    sounds.into_iter().next().unwrap_or(SoundSource::Beep)
}

/// Gets the completion sound for this machine.
#[must_use]
pub fn get_default_sound() -> SoundSource {
    pick_completion_sound(discover_system_sounds())
}

/// Finds a system sound by name, ignoring case.
///
/// # Errors
///
/// Returns `SoundError::FileNotFound` if no sound with the given name exists.
pub fn find_system_sound(name: &str) -> Result<SoundSource, SoundError> {
    discover_system_sounds()
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| SoundError::FileNotFound(format!("system sound '{}' not found", name)))
}
