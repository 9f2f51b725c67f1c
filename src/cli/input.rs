//! Line commands typed into the running app.
//!
//! While the app runs, the terminal plays the part of the main window: the
//! time entry form, the direction picker and the control buttons are all
//! typed as one command per line.

use thiserror::Error;

use crate::engine::{Command, StopSource};
use crate::types::{CountDirection, DisplayMode, TimeInput, TimerConfig};

/// Help text for the line commands.
pub const HELP: &str = "\
commands:
  set H M S             set the time (H 0-23, M 0-59, S 0-59)
  up | down             count direction
  start                 start the timer
  pause | resume        pause or resume the timer
  toggle                pause if running, resume if paused
  stop                  stop the timer
  reset                 dismiss a completed overlay
  mode window|on-top|menu-bar
  sound on|off          completion sound
  fg | bg               app gains / loses focus
  show                  show the main window (as the status item does)
  help                  this text
  quit                  exit";

// ============================================================================
// InputLine
// ============================================================================

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLine {
    Empty,
    Set(TimeInput),
    Direction(CountDirection),
    Start,
    Pause,
    Resume,
    Toggle,
    Stop,
    Reset,
    Mode(DisplayMode),
    Sound(bool),
    Foreground,
    Background,
    Show,
    Help,
    Quit,
}

/// Errors from parsing an input line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parses one input line.
///
/// Time fields follow the entry form rules: empty or non-numeric fields are
/// zero and out-of-range values are clamped.
///
/// # Errors
///
/// Returns `InputError` for unknown commands or malformed arguments.
pub fn parse_line(line: &str) -> Result<InputLine, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(InputLine::Empty);
    };
    let args: Vec<&str> = words.collect();

    let parsed = match head.to_ascii_lowercase().as_str() {
        "set" => {
            if args.len() > 3 {
                return Err(InputError::Usage("set H M S"));
            }
            let field = |i: usize| args.get(i).copied().unwrap_or("");
            InputLine::Set(TimeInput::from_fields(field(0), field(1), field(2)))
        }
        "up" => InputLine::Direction(CountDirection::Up),
        "down" => InputLine::Direction(CountDirection::Down),
        "start" => InputLine::Start,
        "pause" => InputLine::Pause,
        "resume" => InputLine::Resume,
        "toggle" => InputLine::Toggle,
        "stop" => InputLine::Stop,
        "reset" => InputLine::Reset,
        "mode" => match args.as_slice() {
            [mode] => InputLine::Mode(parse_mode(mode)?),
            _ => return Err(InputError::Usage("mode window|on-top|menu-bar")),
        },
        "sound" => match args.as_slice() {
            ["on"] => InputLine::Sound(true),
            ["off"] => InputLine::Sound(false),
            _ => return Err(InputError::Usage("sound on|off")),
        },
        "fg" => InputLine::Foreground,
        "bg" => InputLine::Background,
        "show" => InputLine::Show,
        "help" | "?" => InputLine::Help,
        "quit" | "exit" | "q" => InputLine::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };

    Ok(parsed)
}

fn parse_mode(text: &str) -> Result<DisplayMode, InputError> {
    match text.to_ascii_lowercase().as_str() {
        "window" => Ok(DisplayMode::Window),
        "on-top" | "ontop" => Ok(DisplayMode::OnTop),
        "menu-bar" | "menubar" => Ok(DisplayMode::MenuBar),
        _ => Err(InputError::Usage("mode window|on-top|menu-bar")),
    }
}

// ============================================================================
// ConfigDraft
// ============================================================================

/// What to do after applying a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineAction {
    /// Send a command to the engine
    Send(Command),
    /// Print the help text
    Help,
    /// The draft changed; nothing to send
    Updated,
    /// Nothing to do
    Nothing,
}

/// The time entry form: what the next `start` will use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigDraft {
    pub input: TimeInput,
    pub direction: CountDirection,
}

impl ConfigDraft {
    /// Creates a draft from an initial configuration.
    pub fn new(input: TimeInput, direction: CountDirection) -> Self {
        Self { input, direction }
    }

    /// Returns the configuration a start would use.
    pub fn config(&self) -> TimerConfig {
        TimerConfig::new(self.input, self.direction)
    }

    /// Applies a parsed line, updating the draft or producing a command.
    pub fn apply(&mut self, line: InputLine) -> LineAction {
        let command = match line {
            InputLine::Empty => return LineAction::Nothing,
            InputLine::Help => return LineAction::Help,
            InputLine::Set(input) => {
                self.input = input;
                return LineAction::Updated;
            }
            InputLine::Direction(direction) => {
                self.direction = direction;
                return LineAction::Updated;
            }
            InputLine::Start => Command::Start(self.config()),
            InputLine::Pause => Command::Pause,
            InputLine::Resume => Command::Resume,
            InputLine::Toggle => Command::TogglePause,
            InputLine::Stop => Command::Stop(StopSource::Window),
            InputLine::Reset => Command::Reset,
            InputLine::Mode(mode) => Command::SetDisplayMode(mode),
            InputLine::Sound(enabled) => Command::SetSound(enabled),
            InputLine::Foreground => Command::AppForeground,
            InputLine::Background => Command::AppBackground,
            InputLine::Show => Command::ShowMainWindow,
            InputLine::Quit => Command::Quit,
        };
        LineAction::Send(command)
    }
}

// ============================================================================
// Tests
// ============================================================================
