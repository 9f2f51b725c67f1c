//! The running app: one engine, one command channel, one loop.
//!
//! Commands arrive from three places and are applied in order:
//! - the terminal (line commands)
//! - the menu bar (menu clicks, drained by the UI pump)
//! - the scheduler (ticks and message expiry)

use std::ops::ControlFlow;

use anyhow::Result;
use crossbeam_channel::Receiver;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cli::{parse_line, ConfigDraft, Display, LineAction, RunArgs, HELP};
use crate::engine::{Command, TimerEngine, TokioScheduler};
use crate::menubar::{TrayIconManager, TrayUpdate};
use crate::shell::{appkit, ConsoleShell, OutputFormat, Shell};
use crate::sound::CompletionSound;
use crate::types::DisplayMode;

/// How often the UI pump drains tray updates and native events.
pub const UI_PUMP_INTERVAL: Duration = Duration::from_millis(50);

/// Reports whether the app is the active application, when that is known.
pub type FocusSource = fn() -> Option<bool>;

// ============================================================================
// App
// ============================================================================

/// The engine plus the channel and tray that feed it.
pub struct App<S: Shell> {
    engine: TimerEngine<S, TokioScheduler>,
    command_tx: mpsc::UnboundedSender<Command>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    tray: TrayIconManager,
    focus: FocusSource,
    /// Activation last reported to the engine; `None` until the first pump
    last_active: Option<bool>,
}

impl<S: Shell> App<S> {
    /// Creates an app around `shell`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        shell: S,
        tray_rx: Receiver<TrayUpdate>,
        mode: DisplayMode,
        sound_enabled: bool,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler::new(command_tx.clone());
        let engine = TimerEngine::new(shell, scheduler)
            .with_display_mode(mode)
            .with_sound(sound_enabled);

        Self {
            engine,
            command_tx,
            command_rx,
            tray: TrayIconManager::new(tray_rx),
            focus: appkit::is_active,
            last_active: None,
        }
    }

    /// Replaces where app activation is read from.
    pub fn with_focus_source(mut self, focus: FocusSource) -> Self {
        self.focus = focus;
        self
    }

    /// Returns a sender for submitting commands.
    pub fn sender(&self) -> mpsc::UnboundedSender<Command> {
        self.command_tx.clone()
    }

    /// Returns the engine.
    pub fn engine(&self) -> &TimerEngine<S, TokioScheduler> {
        &self.engine
    }

    /// Returns the engine mutably.
    pub fn engine_mut(&mut self) -> &mut TimerEngine<S, TokioScheduler> {
        &mut self.engine
    }

    /// Runs until `Command::Quit` or Ctrl-C, then returns the engine.
    pub async fn run(mut self) -> TimerEngine<S, TokioScheduler> {
        let mut ui_pump = interval(UI_PUMP_INTERVAL);
        ui_pump.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                Some(command) = self.command_rx.recv() => {
                    if self.engine.handle(command).is_break() {
                        break;
                    }
                }
                _ = ui_pump.tick() => {
                    if self.pump_ui().is_break() {
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    info!("interrupted");
                    let _ = self.engine.handle(Command::Quit);
                    break;
                }
            }
        }

        self.tray.process_all_updates();
        self.tray.shutdown();
        self.engine
    }

    /// Drains native events, tray updates and menu clicks.
    fn pump_ui(&mut self) -> ControlFlow<()> {
        appkit::pump_events();
        self.tray.process_all_updates();

        for action in self.tray.poll_actions() {
            self.engine.handle(action.to_command())?;
        }

        if let Some(active) = (self.focus)() {
            if self.last_active != Some(active) {
                self.last_active = Some(active);
                let command = if active {
                    Command::AppForeground
                } else {
                    Command::AppBackground
                };
                self.engine.handle(command)?;
            }
        }

        self.tray.process_all_updates();
        ControlFlow::Continue(())
    }
}

// ============================================================================
// Terminal input
// ============================================================================

/// Reads line commands from stdin and forwards them as engine commands.
///
/// Stops at end of input or when the engine is gone.
pub fn spawn_input_reader(
    command_tx: mpsc::UnboundedSender<Command>,
    mut draft: ConfigDraft,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("end of terminal input");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "failed to read terminal input");
                    break;
                }
            };

            let action = match parse_line(&line) {
                Ok(parsed) => draft.apply(parsed),
                Err(e) => {
                    eprintln!("{}", Display::error(&e.to_string()));
                    continue;
                }
            };

            match action {
                LineAction::Send(command) => {
                    if command_tx.send(command).is_err() {
                        break;
                    }
                }
                LineAction::Help => println!("{}", HELP),
                LineAction::Updated => {
                    let config = draft.config();
                    debug!(duration = config.duration_seconds, direction = ?config.direction, "time entry updated");
                }
                LineAction::Nothing => {}
            }
        }
    })
}

/// Runs the app described by the launch arguments.
///
/// # Errors
///
/// Returns an error if the app cannot be set up.
pub async fn run(args: RunArgs) -> Result<()> {
    if !appkit::init() {
        debug!("running without AppKit; menu bar and dock are not rendered");
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let (tray_tx, tray_rx) = crossbeam_channel::unbounded();
    let shell = ConsoleShell::stdout(format, CompletionSound::detect(), Some(tray_tx));

    let mut app = App::new(shell, tray_rx, args.display_mode(), !args.no_sound);
    let draft = ConfigDraft::new(args.time_input(), args.direction());

    if format == OutputFormat::Text {
        let welcome = Display::welcome(&app.engine().snapshot());
        app.engine_mut().shell_mut().print_line(&welcome);
    }

    let command_tx = app.sender();
    if args.autostart {
        command_tx.send(Command::Start(draft.config()))?;
    }
    let reader = spawn_input_reader(command_tx, draft);

    info!(mode = ?args.display_mode(), "app started");
    app.run().await;
    reader.abort();

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
