//! Timer engine.
//!
//! This module provides the core timer functionality:
//! - State transitions (Idle → Running ⇄ Paused → Completed / Idle)
//! - Count-down and count-up clocks driven by 1 Hz ticks
//! - Completion side effects per display mode
//! - Transient message expiry
//! - Surface migration when the display mode changes mid-run

use std::ops::ControlFlow;

use serde::Serialize;
use tracing::{debug, info};

use super::command::{Command, MessageToken, StopSource, TickToken};
use super::error::TimerError;
use super::notice::{
    MenuState, MessageKind, NotificationFlags, COMPLETED_MESSAGE, MESSAGE_TIMEOUT,
    STOPPED_MESSAGE,
};
use super::scheduler::Scheduler;
use crate::shell::Shell;
use crate::types::{
    format_time, progress_percent, CountDirection, DisplayMode, Surface, TimerConfig, TimerState,
    WindowLevel,
};

// ============================================================================
// Snapshot
// ============================================================================

/// Everything a view needs to render the timer.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub state: TimerState,
    pub mode: DisplayMode,
    pub surface: Surface,
    /// Clock as `HH:MM:SS`
    pub clock: String,
    /// Run length as `HH:MM:SS`
    pub target: String,
    pub progress_percent: u32,
    pub sound_enabled: bool,
    pub notice: NotificationFlags,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the timer state and drives the shell.
///
/// All methods are total: calls that make no sense in the current state are
/// ignored, so repeated or late calls (a second stop, a tick queued just
/// before a pause) never corrupt the state.
pub struct TimerEngine<S: Shell, K: Scheduler> {
    state: TimerState,
    /// Configuration of the current or last run
    config: TimerConfig,
    mode: DisplayMode,
    sound_enabled: bool,
    /// Whether the app is the active application
    app_active: bool,
    flags: NotificationFlags,
    /// Ticker whose ticks are currently accepted
    ticker: Option<TickToken>,
    next_ticker: u64,
    shell: S,
    scheduler: K,
}

impl<S: Shell, K: Scheduler> TimerEngine<S, K> {
    /// Creates an idle engine in menu-bar mode with sound enabled.
    pub fn new(shell: S, scheduler: K) -> Self {
        Self {
            state: TimerState::Idle,
            config: TimerConfig::default(),
            mode: DisplayMode::default(),
            sound_enabled: true,
            app_active: true,
            flags: NotificationFlags::new(),
            ticker: None,
            next_ticker: 0,
            shell,
            scheduler,
        }
    }

    /// Sets the initial display mode.
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the initial sound preference.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Applies one command.
    ///
    /// Returns `ControlFlow::Break` when the app should shut down.
    pub fn handle(&mut self, command: Command) -> ControlFlow<()> {
        if !command.is_scheduled() {
            debug!(command = %command, state = self.state.as_str(), "handling command");
        }

        match command {
            Command::Start(config) => {
                if let Err(e) = self.start(config) {
                    debug!(error = %e, "start rejected");
                }
            }
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::Stop(source) => self.stop(source),
            Command::Reset => self.reset(),
            Command::Tick(token) => self.on_tick(token),
            Command::ExpireMessage(token) => self.expire_message(token),
            Command::SetDisplayMode(mode) => self.set_display_mode(mode),
            Command::SetSound(enabled) => self.set_sound_enabled(enabled),
            Command::AppForeground => self.on_app_foreground(),
            Command::AppBackground => self.on_app_background(),
            Command::ShowMainWindow => self.show_main_window(),
            Command::Quit => {
                self.shutdown();
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    // ------------------------------------------------------------------------
    // Run control
    // ------------------------------------------------------------------------

    /// Starts a run.
    ///
    /// Ignored while a run is in progress. Any banner and completion state
    /// from the previous run is cleared first.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidConfig` if the duration is zero; the user
    /// sees "Please set a time first!" and the state is unchanged.
    pub fn start(&mut self, config: TimerConfig) -> Result<(), TimerError> {
        if self.state.is_running() {
            debug!("start ignored: timer already running");
            return Ok(());
        }

        self.scheduler.cancel_expiry();
        if self.flags.message.take().is_some() {
            self.shell.clear_transient_message();
        }
        self.set_overlay_completed(false);
        self.flags.persistent_completion = false;
        self.config = config;

        if !config.is_startable() {
            let err = TimerError::InvalidConfig;
            self.show_message(err.user_message(), MessageKind::Transient);
            self.refresh();
            return Err(err);
        }

        self.state = TimerState::running(&config);
        self.start_ticker();

        info!(
            duration = config.duration_seconds,
            direction = ?config.direction,
            mode = ?self.mode,
            "timer started"
        );

        if self.mode == DisplayMode::MenuBar {
            self.install_status_item();
        }
        self.apply_window_placement();
        self.refresh();
        Ok(())
    }

    /// Pauses the run. Ignored unless running and unpaused.
    pub fn pause(&mut self) {
        self.set_paused(true);
    }

    /// Resumes the run. Ignored unless running and paused.
    pub fn resume(&mut self) {
        self.set_paused(false);
    }

    /// Pauses a ticking run or resumes a paused one.
    pub fn toggle_pause(&mut self) {
        match self.state {
            TimerState::Running { paused, .. } => self.set_paused(!paused),
            _ => debug!("toggle ignored: timer not running"),
        }
    }

    fn set_paused(&mut self, pause: bool) {
        let TimerState::Running { paused, .. } = &mut self.state else {
            debug!("pause/resume ignored: timer not running");
            return;
        };
        if *paused == pause {
            return;
        }
        *paused = pause;

        if pause {
            self.cancel_ticker();
            info!(clock = self.state.clock(), "timer paused");
        } else {
            self.start_ticker();
            info!(clock = self.state.clock(), "timer resumed");
        }

        if self.mode == DisplayMode::MenuBar {
            self.set_menu(true, pause);
        }
        self.refresh();
    }

    /// Stops the run and returns to idle with the clock at zero.
    ///
    /// A stop from the window announces itself; a stop from the menu does not.
    pub fn stop(&mut self, source: StopSource) {
        if !self.state.is_running() {
            debug!("stop ignored: timer not running");
            return;
        }

        self.cancel_ticker();
        self.state = TimerState::Idle;
        info!(source = ?source, "timer stopped");

        if source.announces() {
            self.show_message(STOPPED_MESSAGE, MessageKind::Transient);
        }

        if self.mode == DisplayMode::MenuBar {
            self.shell.remove_status_item();
            self.flags.menu = MenuState::default();
        } else {
            self.shell.set_window_level(WindowLevel::Normal);
            self.shell.set_collection_behavior(false);
            self.shell.bring_window_forward();
        }
        self.refresh();
    }

    /// Dismisses a completed run and returns to idle.
    pub fn reset(&mut self) {
        if !self.state.is_completed() {
            debug!("reset ignored: timer not completed");
            return;
        }

        self.clear_completion_message();
        self.state = TimerState::Idle;
        self.refresh();
    }

    /// Applies a tick delivered by the scheduler.
    ///
    /// Ticks from a cancelled ticker may still be queued; only the current
    /// ticker advances the clock.
    fn on_tick(&mut self, token: TickToken) {
        if self.ticker != Some(token) {
            debug!(token = token.0, "tick from cancelled ticker ignored");
            return;
        }
        self.tick();
    }

    /// Advances the clock by one second.
    ///
    /// Ignored unless running and unpaused. Reaching the end completes the run.
    pub fn tick(&mut self) {
        let (clock, done) = match &mut self.state {
            TimerState::Running {
                clock,
                target,
                direction,
                paused: false,
            } => {
                *clock = match direction {
                    CountDirection::Down => clock.saturating_sub(1),
                    CountDirection::Up => (*clock + 1).min(*target),
                };
                (*clock, *clock == direction.final_clock(*target))
            }
            _ => {
                debug!("stale tick ignored");
                return;
            }
        };

        if done {
            self.complete();
            return;
        }

        if self.mode == DisplayMode::MenuBar {
            self.shell.set_status_bar_text(&format_time(clock));
        }
        self.refresh();
    }

    fn complete(&mut self) {
        let TimerState::Running {
            clock,
            target,
            direction,
            ..
        } = self.state
        else {
            return;
        };

        // State leaves Running before any side effect so a queued tick is a no-op.
        self.state = TimerState::Completed {
            clock,
            target,
            direction,
        };
        self.cancel_ticker();

        if self.sound_enabled {
            self.shell.play_completion_sound();
        }

        match self.mode {
            DisplayMode::MenuBar => {
                self.flags.menu_bar_pending = true;
                self.set_dock_badge(true);
                self.shell.set_status_bar_text(&format_time(0));
                self.set_menu(false, false);
            }
            DisplayMode::OnTop => {
                self.flags.persistent_completion = true;
                self.show_message(COMPLETED_MESSAGE, MessageKind::Completion);
                self.set_overlay_completed(true);
                if !self.app_active {
                    self.set_dock_badge(true);
                }
                self.shell.set_window_level(WindowLevel::Floating);
                self.shell.set_collection_behavior(true);
            }
            DisplayMode::Window => {
                self.flags.persistent_completion = true;
                self.show_message(COMPLETED_MESSAGE, MessageKind::Completion);
                if !self.app_active {
                    self.set_dock_badge(true);
                }
                self.shell.set_window_level(WindowLevel::Normal);
                self.shell.bring_window_forward();
            }
        }

        info!(duration = target, mode = ?self.mode, "timer completed");
        self.refresh();
    }

    // ------------------------------------------------------------------------
    // Messages and display
    // ------------------------------------------------------------------------

    /// Hides the banner identified by `token` if it is still a transient message.
    pub fn expire_message(&mut self, token: MessageToken) {
        if self.flags.expire(token) {
            self.shell.clear_transient_message();
            self.refresh();
        } else {
            debug!(token = token.0, "stale message expiry ignored");
        }
    }

    /// Switches the display mode.
    ///
    /// Clears completion state. While running, the status item and window
    /// placement follow the new mode; the timer state itself is untouched.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if mode == self.mode {
            return;
        }

        let previous = self.mode;
        self.mode = mode;
        self.clear_completion_message();

        if self.state.is_running() {
            if previous == DisplayMode::MenuBar {
                self.shell.remove_status_item();
                self.flags.menu = MenuState::default();
            }
            if mode == DisplayMode::MenuBar {
                self.install_status_item();
            }
            self.apply_window_placement();
        }

        info!(from = ?previous, to = ?mode, "display mode changed");
        self.refresh();
    }

    /// Enables or disables the completion sound.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        self.refresh();
    }

    // ------------------------------------------------------------------------
    // Lifecycle hooks
    // ------------------------------------------------------------------------

    /// The app became active.
    ///
    /// Clears the dock badge and any completion banner. A menu-bar completion
    /// keeps its badge until the status item is opened.
    pub fn on_app_foreground(&mut self) {
        self.app_active = true;
        if !self.flags.menu_bar_pending {
            self.set_dock_badge(false);
        }
        self.clear_completion_message();
        self.refresh();
    }

    /// The app resigned active.
    pub fn on_app_background(&mut self) {
        self.app_active = false;
    }

    /// Status item clicked or "Show App" chosen.
    pub fn show_main_window(&mut self) {
        self.flags.menu_bar_pending = false;
        self.set_dock_badge(false);
        self.shell.set_window_level(WindowLevel::Normal);
        self.shell.bring_window_forward();
        self.on_app_foreground();
    }

    /// Cancels scheduled work and removes the status item.
    pub fn shutdown(&mut self) {
        self.cancel_ticker();
        self.scheduler.cancel_expiry();
        self.shell.remove_status_item();
        info!("timer engine shut down");
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the configuration of the current or last run.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns the display mode.
    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Returns true if the completion sound is enabled.
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Returns true if the app is considered foregrounded.
    pub fn is_app_active(&self) -> bool {
        self.app_active
    }

    /// Returns the notification flags.
    pub fn notice(&self) -> &NotificationFlags {
        &self.flags
    }

    /// Returns the surface the main window should render.
    pub fn surface(&self) -> Surface {
        Surface::select(&self.state, self.mode, self.flags.overlay_just_completed)
    }

    /// Builds a render snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            mode: self.mode,
            surface: self.surface(),
            clock: format_time(self.state.clock()),
            target: format_time(self.state.target()),
            progress_percent: progress_percent(self.state.progress()),
            sound_enabled: self.sound_enabled,
            notice: self.flags.clone(),
        }
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    pub fn scheduler(&self) -> &K {
        &self.scheduler
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn start_ticker(&mut self) {
        self.next_ticker += 1;
        let token = TickToken(self.next_ticker);
        self.ticker = Some(token);
        self.scheduler.start_ticker(token);
    }

    fn cancel_ticker(&mut self) {
        self.ticker = None;
        self.scheduler.cancel_ticker();
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.scheduler.cancel_expiry();
        let token = self.flags.show_message(text, kind);
        self.shell
            .show_transient_message(text, kind == MessageKind::Completion);
        if kind == MessageKind::Transient {
            self.scheduler.schedule_expiry(token, MESSAGE_TIMEOUT);
        }
    }

    fn clear_completion_message(&mut self) {
        if self.flags.showing_completion() {
            self.scheduler.cancel_expiry();
            self.flags.message = None;
            self.shell.clear_transient_message();
            self.set_dock_badge(false);
        }
        self.set_overlay_completed(false);
        self.flags.persistent_completion = false;
    }

    fn set_overlay_completed(&mut self, completed: bool) {
        if self.flags.overlay_just_completed != completed {
            self.flags.overlay_just_completed = completed;
            self.shell.set_overlay_completed(completed);
        }
    }

    fn set_dock_badge(&mut self, visible: bool) {
        if self.flags.dock_badge != visible {
            self.flags.dock_badge = visible;
            self.shell.set_dock_badge(visible);
        }
    }

    fn set_menu(&mut self, active: bool, paused: bool) {
        self.flags.menu = MenuState { active, paused };
        self.shell.set_menu_state(active, paused);
    }

    fn install_status_item(&mut self) {
        self.shell.show_status_item();
        self.shell
            .set_status_bar_text(&format_time(self.state.clock()));
        self.set_menu(true, self.state.is_paused());
    }

    fn apply_window_placement(&mut self) {
        match self.mode {
            DisplayMode::OnTop => {
                self.shell.set_window_level(WindowLevel::Floating);
                self.shell.set_collection_behavior(true);
                if self.state.is_running() {
                    self.shell.bring_window_forward();
                }
            }
            DisplayMode::Window => {
                self.shell.set_window_level(WindowLevel::Normal);
                self.shell.set_collection_behavior(false);
                self.shell.bring_window_forward();
            }
            DisplayMode::MenuBar => {
                self.shell.set_window_level(WindowLevel::Normal);
                self.shell.set_collection_behavior(false);
                self.shell.send_window_back();
            }
        }
    }

    fn refresh(&mut self) {
        let snapshot = self.snapshot();
        self.shell.refresh(&snapshot);
    }
}

impl<S: Shell, K: Scheduler> std::fmt::Debug for TimerEngine<S, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("sound_enabled", &self.sound_enabled)
            .field("app_active", &self.app_active)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scheduler::ManualScheduler;
    use crate::shell::{MockShell, ShellCall};

    type TestEngine = TimerEngine<MockShell, ManualScheduler>;

    fn create_engine(mode: DisplayMode) -> TestEngine {
        TimerEngine::new(MockShell::new(), ManualScheduler::new()).with_display_mode(mode)
    }

    fn down(seconds: u32) -> TimerConfig {
        TimerConfig::from_hms(0, 0, seconds, CountDirection::Down)
    }

    fn up(seconds: u32) -> TimerConfig {
        TimerConfig::from_hms(0, 0, seconds, CountDirection::Up)
    }

    fn tick_n(engine: &mut TestEngine, n: u32) {
        for _ in 0..n {
            engine.tick();
        }
    }

    // ------------------------------------------------------------------------
    // Start Tests
    // ------------------------------------------------------------------------

    mod start_tests {
        use super::*;

        #[test]
        fn test_new_engine_is_idle() {
            let engine = create_engine(DisplayMode::MenuBar);
            assert_eq!(*engine.state(), TimerState::Idle);
            assert!(engine.sound_enabled());
            assert!(engine.is_app_active());
            assert!(!engine.scheduler().is_ticking());
        }

        #[test]
        fn test_start_count_down() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(90)).unwrap();

            assert_eq!(
                *engine.state(),
                TimerState::Running {
                    clock: 90,
                    target: 90,
                    direction: CountDirection::Down,
                    paused: false,
                }
            );
            assert!(engine.scheduler().is_ticking());
        }

        #[test]
        fn test_start_count_up() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(up(90)).unwrap();

            assert_eq!(engine.state().clock(), 0);
            assert_eq!(engine.state().target(), 90);
        }

        #[test]
        fn test_start_zero_duration_rejected() {
            let mut engine = create_engine(DisplayMode::Window);

            let result = engine.start(down(0));

            assert_eq!(result, Err(TimerError::InvalidConfig));
            assert_eq!(*engine.state(), TimerState::Idle);
            assert_eq!(engine.shell().messages(), vec!["Please set a time first!"]);
            assert!(!engine.scheduler().is_ticking());
            let (_, delay) = engine.scheduler().pending_expiry().unwrap();
            assert_eq!(delay, MESSAGE_TIMEOUT);
        }

        #[test]
        fn test_start_while_running_ignored() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(10)).unwrap();
            tick_n(&mut engine, 3);

            engine.start(down(99)).unwrap();

            assert_eq!(engine.state().clock(), 7);
            assert_eq!(engine.config().duration_seconds, 10);
            assert_eq!(engine.scheduler().ticker_starts(), 1);
        }

        #[test]
        fn test_start_menu_bar_installs_status_item() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(65)).unwrap();

            let shell = engine.shell();
            assert!(shell.has(&ShellCall::ShowStatusItem));
            assert_eq!(shell.status_bar_text(), Some("00:01:05"));
            assert_eq!(shell.menu_state(), Some((true, false)));
            assert!(shell.has(&ShellCall::SendWindowBack));
            assert!(!shell.has(&ShellCall::BringWindowForward));
        }

        #[test]
        fn test_start_on_top_floats_window() {
            let mut engine = create_engine(DisplayMode::OnTop);
            engine.start(down(5)).unwrap();

            let shell = engine.shell();
            assert_eq!(shell.window_level(), Some(WindowLevel::Floating));
            assert!(shell.has(&ShellCall::SetCollectionBehavior(true)));
            assert!(shell.has(&ShellCall::BringWindowForward));
            assert!(!shell.has(&ShellCall::ShowStatusItem));
            assert_eq!(engine.surface(), Surface::Overlay);
        }

        #[test]
        fn test_start_window_brings_forward() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(5)).unwrap();

            let shell = engine.shell();
            assert_eq!(shell.window_level(), Some(WindowLevel::Normal));
            assert!(shell.has(&ShellCall::SetCollectionBehavior(false)));
            assert!(shell.has(&ShellCall::BringWindowForward));
        }

        #[test]
        fn test_start_clears_pending_message() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(0)).unwrap_err();
            assert!(engine.scheduler().pending_expiry().is_some());

            engine.start(down(5)).unwrap();

            assert!(engine.notice().message.is_none());
            assert!(engine.scheduler().pending_expiry().is_none());
            assert!(engine.shell().has(&ShellCall::ClearMessage));
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_count_down_reaches_zero() {
            for d in [1, 2, 7, 60] {
                let mut engine = create_engine(DisplayMode::Window);
                engine.start(down(d)).unwrap();
                tick_n(&mut engine, d);

                assert!(engine.state().is_completed(), "duration {}", d);
                assert_eq!(engine.state().remaining(), 0);
            }
        }

        #[test]
        fn test_count_up_reaches_target() {
            for d in [1, 2, 7, 60] {
                let mut engine = create_engine(DisplayMode::Window);
                engine.start(up(d)).unwrap();
                tick_n(&mut engine, d);

                assert!(engine.state().is_completed(), "duration {}", d);
                assert_eq!(engine.state().elapsed(), d);
                assert_eq!(engine.state().clock(), d);
            }
        }

        #[test]
        fn test_not_completed_one_tick_early() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(5)).unwrap();
            tick_n(&mut engine, 4);

            assert!(engine.state().is_running());
            assert_eq!(engine.state().clock(), 1);
        }

        #[test]
        fn test_tick_while_idle_ignored() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.tick();

            assert_eq!(*engine.state(), TimerState::Idle);
            assert!(engine.shell().calls().is_empty());
        }

        #[test]
        fn test_ticks_after_completion_ignored() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(2)).unwrap();
            tick_n(&mut engine, 2);
            let calls = engine.shell().calls().len();

            tick_n(&mut engine, 5);

            assert!(engine.state().is_completed());
            assert_eq!(engine.shell().calls().len(), calls);
            assert_eq!(engine.shell().sound_count(), 1);
        }

        #[test]
        fn test_menu_bar_tick_updates_status_text() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(10)).unwrap();
            engine.tick();

            assert_eq!(engine.shell().status_bar_text(), Some("00:00:09"));
        }

        #[test]
        fn test_window_tick_leaves_status_text_alone() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(10)).unwrap();
            engine.tick();

            assert_eq!(engine.shell().status_bar_text(), None);
            assert_eq!(engine.snapshot().clock, "00:00:09");
        }

        #[test]
        fn test_tick_from_cancelled_ticker_ignored() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(30)).unwrap();
            let old = engine.scheduler().ticker_token().unwrap();
            engine.stop(StopSource::Window);
            engine.start(down(10)).unwrap();

            engine.handle(Command::Tick(old));

            assert_eq!(engine.state().clock(), 10);
            assert_ne!(engine.scheduler().ticker_token(), Some(old));
        }

        #[test]
        fn test_tick_from_current_ticker_applied() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(10)).unwrap();
            let token = engine.scheduler().ticker_token().unwrap();

            engine.handle(Command::Tick(token));

            assert_eq!(engine.state().clock(), 9);
        }

        #[test]
        fn test_tick_queued_before_pause_ignored_after_resume() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(10)).unwrap();
            let before_pause = engine.scheduler().ticker_token().unwrap();
            engine.pause();
            engine.resume();

            engine.handle(Command::Tick(before_pause));

            assert_eq!(engine.state().clock(), 10);
        }

        #[test]
        fn test_progress_follows_clock() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(up(4)).unwrap();
            engine.tick();

            assert_eq!(engine.snapshot().progress_percent, 25);
        }
    }

    // ------------------------------------------------------------------------
    // Pause / Resume Tests
    // ------------------------------------------------------------------------

    mod pause_tests {
        use super::*;

        #[test]
        fn test_pause_freezes_clock() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(30)).unwrap();
            tick_n(&mut engine, 4);

            engine.pause();
            tick_n(&mut engine, 100);

            assert!(engine.state().is_paused());
            assert_eq!(engine.state().clock(), 26);
            assert!(!engine.scheduler().is_ticking());
        }

        #[test]
        fn test_resume_continues_exactly() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(30)).unwrap();
            tick_n(&mut engine, 4);
            engine.pause();
            tick_n(&mut engine, 10);

            engine.resume();
            tick_n(&mut engine, 2);

            assert_eq!(engine.state().clock(), 24);
            assert!(engine.scheduler().is_ticking());
        }

        #[test]
        fn test_pause_and_resume_idempotent() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(30)).unwrap();

            engine.pause();
            engine.pause();
            assert!(engine.state().is_paused());
            assert_eq!(engine.scheduler().ticker_cancels(), 1);

            engine.resume();
            engine.resume();
            assert!(!engine.state().is_paused());
            assert_eq!(engine.scheduler().ticker_starts(), 2);
        }

        #[test]
        fn test_toggle_pause() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(30)).unwrap();

            engine.toggle_pause();
            assert!(engine.state().is_paused());
            engine.toggle_pause();
            assert!(!engine.state().is_paused());
        }

        #[test]
        fn test_pause_while_idle_ignored() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.pause();
            engine.resume();
            engine.toggle_pause();

            assert_eq!(*engine.state(), TimerState::Idle);
            assert!(engine.shell().calls().is_empty());
        }

        #[test]
        fn test_menu_bar_pause_updates_menu() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(30)).unwrap();

            engine.toggle_pause();
            assert_eq!(engine.shell().menu_state(), Some((true, true)));
            assert!(engine.notice().menu.paused);

            engine.toggle_pause();
            assert_eq!(engine.shell().menu_state(), Some((true, false)));
        }
    }

    // ------------------------------------------------------------------------
    // Stop / Reset Tests
    // ------------------------------------------------------------------------

    mod stop_tests {
        use super::*;

        #[test]
        fn test_stop_returns_to_idle() {
            for paused in [false, true] {
                let mut engine = create_engine(DisplayMode::Window);
                engine.start(down(30)).unwrap();
                tick_n(&mut engine, 3);
                if paused {
                    engine.pause();
                }

                engine.stop(StopSource::Window);

                assert_eq!(*engine.state(), TimerState::Idle);
                assert_eq!(engine.state().clock(), 0);
                assert!(!engine.scheduler().is_ticking());
            }
        }

        #[test]
        fn test_stop_from_window_announces() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(30)).unwrap();

            engine.stop(StopSource::Window);

            assert_eq!(engine.shell().messages(), vec!["Timer stopped"]);
            assert!(engine.scheduler().pending_expiry().is_some());
            assert!(engine.shell().has(&ShellCall::BringWindowForward));
            assert_eq!(engine.shell().window_level(), Some(WindowLevel::Normal));
        }

        #[test]
        fn test_stop_from_menu_is_silent() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(30)).unwrap();

            engine.stop(StopSource::Menu);

            assert!(engine.shell().messages().is_empty());
            assert!(engine.shell().has(&ShellCall::RemoveStatusItem));
            assert_eq!(engine.notice().menu, MenuState::default());
        }

        #[test]
        fn test_double_stop_is_harmless() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(30)).unwrap();

            engine.stop(StopSource::Window);
            engine.stop(StopSource::Window);

            assert_eq!(engine.shell().messages().len(), 1);
            assert_eq!(engine.scheduler().ticker_cancels(), 1);
        }

        #[test]
        fn test_tick_after_stop_ignored() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(30)).unwrap();
            engine.stop(StopSource::Menu);

            engine.tick();

            assert_eq!(*engine.state(), TimerState::Idle);
        }

        #[test]
        fn test_reset_from_completed_overlay() {
            let mut engine = create_engine(DisplayMode::OnTop);
            engine.start(down(1)).unwrap();
            engine.tick();
            assert_eq!(engine.surface(), Surface::OverlayCompleted);

            engine.reset();

            assert_eq!(*engine.state(), TimerState::Idle);
            assert_eq!(engine.surface(), Surface::FullInterface);
            assert!(engine.notice().message.is_none());
            assert!(!engine.notice().persistent_completion);
            assert!(engine.shell().has(&ShellCall::SetOverlayCompleted(false)));
        }

        #[test]
        fn test_reset_while_running_ignored() {
            let mut engine = create_engine(DisplayMode::OnTop);
            engine.start(down(10)).unwrap();

            engine.reset();

            assert!(engine.state().is_running());
        }
    }

    // ------------------------------------------------------------------------
    // Completion Tests
    // ------------------------------------------------------------------------

    mod completion_tests {
        use super::*;

        #[test]
        fn test_menu_bar_completion() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(5)).unwrap();
            tick_n(&mut engine, 5);

            let shell = engine.shell();
            assert!(engine.state().is_completed());
            assert!(shell.dock_badge());
            assert_eq!(shell.status_bar_text(), Some("00:00:00"));
            assert_eq!(shell.menu_state(), Some((false, false)));
            assert!(shell.messages().is_empty());
            assert_eq!(shell.sound_count(), 1);
            assert!(!engine.scheduler().is_ticking());
        }

        #[test]
        fn test_menu_bar_count_up_completion_shows_zero() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(up(3)).unwrap();
            tick_n(&mut engine, 3);

            assert_eq!(engine.shell().status_bar_text(), Some("00:00:00"));
            assert_eq!(engine.state().clock(), 3);
        }

        #[test]
        fn test_on_top_completion_while_active() {
            let mut engine = create_engine(DisplayMode::OnTop);
            engine.start(down(2)).unwrap();
            engine.shell_mut().clear_calls();
            tick_n(&mut engine, 2);

            let shell = engine.shell();
            assert_eq!(
                shell.calls(),
                &[
                    ShellCall::PlaySound,
                    ShellCall::ShowMessage {
                        text: "Timer completed!".to_string(),
                        is_completion: true,
                    },
                    ShellCall::SetOverlayCompleted(true),
                    ShellCall::SetWindowLevel(WindowLevel::Floating),
                    ShellCall::SetCollectionBehavior(true),
                ]
            );
            assert!(engine.notice().persistent_completion);
            assert!(engine.scheduler().pending_expiry().is_none());
        }

        #[test]
        fn test_on_top_completion_in_background_badges() {
            let mut engine = create_engine(DisplayMode::OnTop);
            engine.start(down(1)).unwrap();
            engine.on_app_background();
            engine.tick();

            assert!(engine.shell().dock_badge());
        }

        #[test]
        fn test_window_completion() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(1)).unwrap();
            engine.shell_mut().clear_calls();
            engine.tick();

            let shell = engine.shell();
            assert_eq!(shell.messages(), vec!["Timer completed!"]);
            assert!(!shell.dock_badge());
            assert!(shell.has(&ShellCall::BringWindowForward));
            assert_eq!(shell.window_level(), Some(WindowLevel::Normal));
            assert!(!engine.notice().overlay_just_completed);
        }

        #[test]
        fn test_window_completion_in_background_badges() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(1)).unwrap();
            engine.on_app_background();
            engine.tick();

            assert!(engine.shell().dock_badge());
        }

        #[test]
        fn test_sound_disabled() {
            let mut engine = create_engine(DisplayMode::Window).with_sound(false);
            engine.start(down(1)).unwrap();
            engine.tick();

            assert_eq!(engine.shell().sound_count(), 0);
            assert!(engine.state().is_completed());
        }

        #[test]
        fn test_sound_precedes_surface_effects() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(1)).unwrap();
            engine.shell_mut().clear_calls();
            engine.tick();

            assert_eq!(engine.shell().calls()[0], ShellCall::PlaySound);
        }

        #[test]
        fn test_restart_after_completion() {
            let mut engine = create_engine(DisplayMode::OnTop);
            engine.start(down(1)).unwrap();
            engine.tick();

            engine.start(up(3)).unwrap();

            assert!(engine.state().is_running());
            assert!(engine.notice().message.is_none());
            assert!(!engine.notice().persistent_completion);
            assert!(!engine.notice().overlay_just_completed);
        }

        #[test]
        fn test_invalid_restart_after_completion_keeps_state() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(1)).unwrap();
            engine.tick();

            assert!(engine.start(down(0)).is_err());

            assert!(engine.state().is_completed());
            assert_eq!(
                engine.notice().message_text(),
                Some("Please set a time first!")
            );
        }
    }

    // ------------------------------------------------------------------------
    // Message Tests
    // ------------------------------------------------------------------------

    mod message_tests {
        use super::*;

        #[test]
        fn test_transient_message_expires() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(0)).unwrap_err();
            let (token, _) = engine.scheduler().pending_expiry().unwrap();

            engine.expire_message(token);

            assert!(engine.notice().message.is_none());
            assert!(engine.shell().has(&ShellCall::ClearMessage));
        }

        #[test]
        fn test_stale_expiry_keeps_newer_message() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(0)).unwrap_err();
            let (stale, _) = engine.scheduler().pending_expiry().unwrap();
            engine.start(down(30)).unwrap();
            engine.stop(StopSource::Window);

            engine.expire_message(stale);

            assert_eq!(engine.notice().message_text(), Some("Timer stopped"));
        }

        #[test]
        fn test_completion_message_does_not_expire() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(1)).unwrap();
            engine.tick();
            let token = engine.notice().message.as_ref().unwrap().token;

            engine.expire_message(token);

            assert_eq!(engine.notice().message_text(), Some("Timer completed!"));
        }
    }

    // ------------------------------------------------------------------------
    // Display Mode Tests
    // ------------------------------------------------------------------------

    mod display_mode_tests {
        use super::*;

        #[test]
        fn test_mode_change_keeps_timer_state() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(up(40)).unwrap();
            tick_n(&mut engine, 7);
            let before = *engine.state();

            for mode in [DisplayMode::OnTop, DisplayMode::MenuBar, DisplayMode::Window] {
                engine.set_display_mode(mode);
                assert_eq!(*engine.state(), before);
            }
        }

        #[test]
        fn test_mode_change_redirects_updates() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(40)).unwrap();
            engine.tick();
            assert_eq!(engine.shell().status_bar_text(), None);

            engine.set_display_mode(DisplayMode::MenuBar);
            assert!(engine.shell().has(&ShellCall::ShowStatusItem));
            assert_eq!(engine.shell().status_bar_text(), Some("00:00:39"));

            engine.tick();
            assert_eq!(engine.shell().status_bar_text(), Some("00:00:38"));

            engine.set_display_mode(DisplayMode::OnTop);
            assert!(engine.shell().has(&ShellCall::RemoveStatusItem));
            assert_eq!(engine.surface(), Surface::Overlay);
        }

        #[test]
        fn test_mode_change_to_menu_bar_keeps_paused_label() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.start(down(40)).unwrap();
            engine.pause();

            engine.set_display_mode(DisplayMode::MenuBar);

            assert_eq!(engine.shell().menu_state(), Some((true, true)));
        }

        #[test]
        fn test_mode_change_clears_completion() {
            let mut engine = create_engine(DisplayMode::OnTop);
            engine.on_app_background();
            engine.start(down(1)).unwrap();
            engine.tick();
            assert!(engine.shell().dock_badge());

            engine.set_display_mode(DisplayMode::Window);

            assert!(engine.notice().message.is_none());
            assert!(!engine.notice().persistent_completion);
            assert!(!engine.notice().overlay_just_completed);
            assert!(!engine.shell().dock_badge());
        }

        #[test]
        fn test_same_mode_is_noop() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.set_display_mode(DisplayMode::Window);
            assert!(engine.shell().calls().is_empty());
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle Tests
    // ------------------------------------------------------------------------

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn test_foreground_clears_window_completion() {
            let mut engine = create_engine(DisplayMode::Window);
            engine.on_app_background();
            engine.start(down(1)).unwrap();
            engine.tick();
            assert!(engine.shell().dock_badge());

            engine.on_app_foreground();

            assert!(!engine.shell().dock_badge());
            assert!(engine.notice().message.is_none());
            assert!(!engine.notice().persistent_completion);
            assert!(engine.is_app_active());
        }

        #[test]
        fn test_foreground_keeps_menu_bar_badge() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(1)).unwrap();
            engine.tick();

            engine.on_app_foreground();

            assert!(engine.shell().dock_badge());
            assert!(engine.notice().menu_bar_pending);
        }

        #[test]
        fn test_show_main_window_clears_menu_bar_badge() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(1)).unwrap();
            engine.tick();

            engine.show_main_window();

            assert!(!engine.shell().dock_badge());
            assert!(!engine.notice().menu_bar_pending);
            assert!(engine.shell().has(&ShellCall::BringWindowForward));
        }

        #[test]
        fn test_handle_quit_breaks() {
            let mut engine = create_engine(DisplayMode::MenuBar);
            engine.start(down(10)).unwrap();

            assert!(engine.handle(Command::Quit).is_break());
            assert!(!engine.scheduler().is_ticking());
        }

        #[test]
        fn test_handle_dispatches() {
            let mut engine = create_engine(DisplayMode::Window);

            assert!(engine.handle(Command::Start(down(3))).is_continue());
            let token = engine.scheduler().ticker_token().unwrap();
            engine.handle(Command::Tick(token));
            engine.handle(Command::TogglePause);
            engine.handle(Command::Tick(token));
            engine.handle(Command::SetSound(false));

            assert!(engine.state().is_paused());
            assert_eq!(engine.state().clock(), 2);
            assert!(!engine.sound_enabled());
        }

        #[test]
        fn test_refresh_carries_snapshot() {
            let mut engine = create_engine(DisplayMode::OnTop);
            engine.start(down(10)).unwrap();
            engine.tick();

            let snapshot = engine.shell().last_snapshot().unwrap();
            assert_eq!(snapshot.clock, "00:00:09");
            assert_eq!(snapshot.target, "00:00:10");
            assert_eq!(snapshot.surface, Surface::Overlay);
            assert_eq!(snapshot.progress_percent, 90);
        }
    }
}
