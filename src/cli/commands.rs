//! Command definitions for the TimeMeUp CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{CountDirection, DisplayMode, TimeInput, TimerConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// TimeMeUp - a count-up / count-down timer for the macOS menu bar
#[derive(Parser, Debug)]
#[command(
    name = "timemeup",
    version,
    about = "Count-up / count-down timer for the macOS menu bar",
    long_about = "A small timer with three display modes: a regular window, an always-on-top \n\
                  overlay, and a menu-bar clock. Plays a sound and badges the dock on completion.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer app
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Display Argument
// ============================================================================

/// Display mode as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayArg {
    /// Regular application window
    Window,
    /// Floating overlay above other windows
    OnTop,
    /// Clock in the menu bar
    #[default]
    MenuBar,
}

impl From<DisplayArg> for DisplayMode {
    fn from(arg: DisplayArg) -> Self {
        match arg {
            DisplayArg::Window => DisplayMode::Window,
            DisplayArg::OnTop => DisplayMode::OnTop,
            DisplayArg::MenuBar => DisplayMode::MenuBar,
        }
    }
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Hours (0-23)
    #[arg(
        short = 'H',
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=23)
    )]
    pub hours: u32,

    /// Minutes (0-59)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=59)
    )]
    pub minutes: u32,

    /// Seconds (0-59)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=59)
    )]
    pub seconds: u32,

    /// Count up from zero instead of down to zero
    #[arg(short = 'u', long)]
    pub count_up: bool,

    /// Where the timer is shown
    #[arg(short, long, value_enum, default_value_t = DisplayArg::MenuBar)]
    pub display: DisplayArg,

    /// Disable the completion sound
    #[arg(long)]
    pub no_sound: bool,

    /// Print one JSON object per state change instead of a status line
    #[arg(long)]
    pub json: bool,

    /// Start the timer immediately
    #[arg(short, long)]
    pub autostart: bool,
}

impl RunArgs {
    /// Returns the time fields as an input.
    pub fn time_input(&self) -> TimeInput {
        TimeInput::new(self.hours, self.minutes, self.seconds)
    }

    /// Returns the count direction.
    pub fn direction(&self) -> CountDirection {
        if self.count_up {
            CountDirection::Up
        } else {
            CountDirection::Down
        }
    }

    /// Returns the timer configuration described by the arguments.
    pub fn config(&self) -> TimerConfig {
        TimerConfig::new(self.time_input(), self.direction())
    }

    /// Returns the display mode.
    pub fn display_mode(&self) -> DisplayMode {
        self.display.into()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> RunArgs {
        let mut argv = vec!["timemeup", "run"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Some(Commands::Run(args)) => args,
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["timemeup"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["timemeup", "-v", "run"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_completions() {
            let cli = Cli::parse_from(["timemeup", "completions", "zsh"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Completions {
                    shell: clap_complete::Shell::Zsh
                })
            ));
        }

        #[test]
        fn test_verify_cli() {
            use clap::CommandFactory;
            Cli::command().debug_assert();
        }
    }

    // ------------------------------------------------------------------------
    // RunArgs Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let args = run_args(&[]);

            assert_eq!(args.time_input(), TimeInput::default());
            assert_eq!(args.display_mode(), DisplayMode::MenuBar);
            assert_eq!(args.direction(), CountDirection::Down);
            assert!(!args.no_sound);
            assert!(!args.json);
            assert!(!args.autostart);
        }

        #[test]
        fn test_time_fields() {
            let args = run_args(&["--hours", "1", "--minutes", "2", "--seconds", "3"]);

            assert_eq!(args.config().duration_seconds, 3723);
        }

        #[test]
        fn test_count_up_and_display() {
            let args = run_args(&["-u", "--display", "on-top", "-s", "30"]);

            assert_eq!(args.direction(), CountDirection::Up);
            assert_eq!(args.display_mode(), DisplayMode::OnTop);
            assert_eq!(args.config().direction, CountDirection::Up);
        }

        #[test]
        fn test_out_of_range_rejected() {
            for argv in [
                ["timemeup", "run", "--hours", "24"],
                ["timemeup", "run", "--minutes", "60"],
                ["timemeup", "run", "--seconds", "60"],
            ] {
                assert!(Cli::try_parse_from(argv).is_err());
            }
        }

        #[test]
        fn test_unknown_display_rejected() {
            let result = Cli::try_parse_from(["timemeup", "run", "--display", "dock"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_flags() {
            let args = run_args(&["--no-sound", "--json", "--autostart"]);

            assert!(args.no_sound);
            assert!(args.json);
            assert!(args.autostart);
        }
    }
}
