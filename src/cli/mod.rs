//! CLI module for TimeMeUp.
//!
//! This module provides the command-line interface:
//! - `commands`: Launch arguments using clap derive
//! - `input`: Line commands typed while the app runs
//! - `display`: Output formatting

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, DisplayArg, RunArgs};
pub use display::Display;
pub use input::{parse_line, ConfigDraft, InputError, InputLine, LineAction, HELP};
