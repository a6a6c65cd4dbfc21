//! The input router.
//!
//! An [`Interactor`] owns the command registry, the binding table and the
//! [`ViewerState`] handed to every command. Raw events go in through
//! [`Interactor::handle_event`]; presses resolve a bind for the current
//! modifier set and run its command lines in order. The host drives time
//! through [`Interactor::event_loop`], or hands control over entirely with
//! [`Interactor::start_with_callback`].

mod context;

use std::path::Path;

use web_time::{Duration, Instant};

pub use context::{
    ColoringArray, NullSurface, RenderSurface, ViewerState,
    ANIMATION_INDEX_OPTION, AUTOPLAY_OPTION, SPEED_FACTOR_OPTION,
};

use crate::bindings::{
    Bind, BindingDocumentation, BindingTable, BindingType, ModifierKeys,
};
use crate::command::{
    quote, register_builtins, CommandRegistry, CommandResult,
};
use crate::error::InteractError;
use crate::input::{key_token, InputAction, InputEvent, ModifierTracker};
use crate::recorder::{
    EventRecord, LogReader, PlaybackSummary, RecorderState, SessionRecorder,
    StreamVersion,
};

/// What to do when a command of a bind fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DispatchPolicy {
    /// Log the failure and run the remaining commands.
    #[default]
    Continue,
    /// Skip the remaining commands of the bind.
    FailFast,
}

/// Outcome of routing one event to a bind.
#[derive(Debug)]
pub struct DispatchReport {
    /// Bind that matched, possibly an `Any+` fallback.
    pub bind: Bind,
    /// Command lines triggered, failed ones included.
    pub commands_run: usize,
    /// Failures, in order.
    pub failures: Vec<InteractError>,
}

impl DispatchReport {
    /// Whether every triggered command succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Receives text input events.
pub type TextSink = Box<dyn FnMut(char)>;

#[derive(Debug)]
struct ScheduledCommand {
    due: f64,
    line: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Interactor
// ─────────────────────────────────────────────────────────────────────────────

/// Routes input to bound commands and drives the viewer's time.
///
/// # Usage
///
/// ```ignore
/// let mut interactor = Interactor::new(ViewerState::headless());
/// interactor.bindings_mut().add(
///     Bind::parse("Ctrl+S")?,
///     ["take_screenshot"],
///     "Others",
///     None,
/// );
/// interactor.handle_event(InputEvent::ModifiersChanged {
///     ctrl: true, shift: false, alt: false,
/// });
/// interactor.handle_event(InputEvent::KeyboardKey {
///     action: InputAction::Press,
///     key: "s".into(),
/// });
/// interactor.event_loop(1.0 / 30.0);
/// ```
pub struct Interactor {
    registry: CommandRegistry,
    bindings: BindingTable,
    state: ViewerState,
    modifiers: ModifierTracker,
    mouse_position: (i32, i32),
    policy: DispatchPolicy,
    text_sink: Option<TextSink>,
    recorder: SessionRecorder,
    console_line: Option<String>,
    scheduled: Vec<ScheduledCommand>,
    clock: f64,
    stop_hotkey: Bind,
}

impl Interactor {
    /// Interactor over `state` with the built-in commands and default binds.
    #[must_use]
    pub fn new(state: ViewerState) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        Self::with_parts(registry, BindingTable::with_defaults(), state)
    }

    /// Interactor over an explicit registry and binding table.
    #[must_use]
    pub fn with_parts(
        registry: CommandRegistry,
        bindings: BindingTable,
        state: ViewerState,
    ) -> Self {
        Self {
            registry,
            bindings,
            state,
            modifiers: ModifierTracker::default(),
            mouse_position: (0, 0),
            policy: DispatchPolicy::default(),
            text_sink: None,
            recorder: SessionRecorder::new(),
            console_line: None,
            scheduled: Vec::new(),
            clock: 0.0,
            stop_hotkey: Bind::new(ModifierKeys::Ctrl, "Q"),
        }
    }

    /// Registered commands.
    #[must_use]
    pub const fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Registered commands, for adding host commands.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Bind table.
    #[must_use]
    pub const fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Bind table, for adding host binds.
    pub fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    /// Context handed to commands.
    #[must_use]
    pub const fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Context handed to commands.
    pub fn state_mut(&mut self) -> &mut ViewerState {
        &mut self.state
    }

    /// Current modifier state.
    #[must_use]
    pub const fn modifiers(&self) -> &ModifierTracker {
        &self.modifiers
    }

    /// Last reported cursor position.
    #[must_use]
    pub const fn mouse_position(&self) -> (i32, i32) {
        self.mouse_position
    }

    /// Failure handling of bind dispatch.
    #[must_use]
    pub const fn dispatch_policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Change failure handling of bind dispatch.
    pub fn set_dispatch_policy(&mut self, policy: DispatchPolicy) {
        self.policy = policy;
    }

    /// Route text input to `sink`.
    pub fn set_text_sink(&mut self, sink: impl FnMut(char) + 'static) {
        self.text_sink = Some(Box::new(sink));
    }

    /// Bind that stops recording and is never written to a log.
    #[must_use]
    pub const fn stop_hotkey(&self) -> &Bind {
        &self.stop_hotkey
    }

    /// Change the bind that stops recording.
    pub fn set_stop_hotkey(&mut self, bind: Bind) {
        self.stop_hotkey = bind;
    }

    /// Recording/playback state.
    #[must_use]
    pub const fn recorder_state(&self) -> RecorderState {
        self.recorder.state()
    }

    /// Whether the interactor reached its terminal stopped state.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.state.stop_requested()
    }

    /// Seconds of event-loop time elapsed.
    #[must_use]
    pub const fn clock(&self) -> f64 {
        self.clock
    }

    /// Display classification of `bind`.
    #[must_use]
    pub fn binding_type(&self, bind: &Bind) -> BindingType {
        self.bindings
            .binding_type(bind, &self.registry, self.state.options.as_ref())
    }

    /// Cheat-sheet documentation of `bind`, evaluated now.
    #[must_use]
    pub fn binding_documentation(
        &self,
        bind: &Bind,
    ) -> Option<BindingDocumentation> {
        self.bindings
            .binding_documentation(bind, &self.registry, &self.state)
    }

    /// Run one console line right away.
    pub fn trigger_command(
        &mut self,
        line: &str,
        strip_comments: bool,
    ) -> CommandResult {
        let result =
            self.registry.trigger(&mut self.state, line, strip_comments);
        self.after_commands();
        result
    }

    // ── Routing ──────────────────────────────────────────────────────────

    /// Route one raw event.
    ///
    /// Returns a report when the event resolved a bind. Once stopped, events
    /// are accepted and ignored.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
    ) -> Option<DispatchReport> {
        if self.is_stopped() {
            log::debug!("Interactor: stopped, ignoring {event:?}");
            return None;
        }
        self.record_event(&event);

        match event {
            InputEvent::ModifiersChanged { ctrl, shift, alt } => {
                let _ = self.modifiers.update(ctrl, shift);
                self.modifiers.set_alt(alt);
                None
            }
            InputEvent::MousePosition { x, y } => {
                self.mouse_position = (x, y);
                None
            }
            InputEvent::MouseButton {
                action: InputAction::Press,
                button,
            } => self.dispatch(button.token(), &[]),
            InputEvent::MouseWheel { direction } => {
                self.dispatch(direction.token(), &[])
            }
            InputEvent::KeyboardKey {
                action: InputAction::Press,
                key,
            } => self.dispatch(&key_token(&key), &[]),
            InputEvent::MouseButton { .. } | InputEvent::KeyboardKey { .. } => {
                None
            }
            InputEvent::TextCharacter { codepoint } => {
                self.forward_text(codepoint);
                None
            }
            InputEvent::DropFiles { paths } => self.dispatch("Drop", &paths),
        }
    }

    fn forward_text(&mut self, codepoint: u32) {
        let Some(sink) = self.text_sink.as_mut() else {
            return;
        };
        match char::from_u32(codepoint) {
            Some(c) => sink(c),
            None => log::warn!("Interactor: invalid code point {codepoint:#x}"),
        }
    }

    /// Run the commands bound to `key` under the current modifiers, with
    /// `extra` appended to each line as quoted arguments.
    fn dispatch(
        &mut self,
        key: &str,
        extra: &[String],
    ) -> Option<DispatchReport> {
        let (bind, commands) = self
            .bindings
            .resolve(self.modifiers.current(), key)
            .map(|(bind, commands)| (bind.clone(), commands.to_vec()))?;
        log::debug!("Interactor: {bind} -> {commands:?}");

        let suffix: String =
            extra.iter().map(|a| format!(" {}", quote(a))).collect();
        let mut report = DispatchReport {
            bind,
            commands_run: 0,
            failures: Vec::new(),
        };
        for line in commands {
            report.commands_run += 1;
            let full = format!("{line}{suffix}");
            match self.registry.trigger(&mut self.state, &full, false) {
                Ok(output) => show_output(output),
                Err(err) => {
                    report.failures.push(err);
                    if self.policy == DispatchPolicy::FailFast {
                        break;
                    }
                }
            }
        }
        self.after_commands();
        Some(report)
    }

    /// Close the log once a command asked to stop.
    fn after_commands(&mut self) {
        if self.state.stop_requested() && self.recorder.is_recording() {
            if let Err(e) = self.recorder.stop() {
                log::error!("Interactor: {e}");
            }
        }
    }

    /// Enter the terminal stopped state. Recording, if any, is flushed and
    /// closed.
    pub fn request_stop(&mut self) {
        log::debug!("Interactor: stop requested");
        self.state.request_stop();
        self.after_commands();
    }

    // ── Time ─────────────────────────────────────────────────────────────

    /// Queue `line` for the next event-loop tick, replacing a line still
    /// waiting there. `#` comments are stripped when it runs.
    pub fn submit_console_line(&mut self, line: impl Into<String>) {
        if let Some(previous) = self.console_line.replace(line.into()) {
            log::warn!(
                "Interactor: dropped pending console line \"{previous}\""
            );
        }
    }

    /// Run `line` once `delay` seconds of event-loop time have elapsed.
    pub fn schedule_command(&mut self, delay: f64, line: impl Into<String>) {
        self.scheduled.push(ScheduledCommand {
            due: self.clock + delay.max(0.0),
            line: line.into(),
        });
    }

    /// Advance by `dt` seconds: run the console line and due scheduled
    /// commands, tick the animation, then render if anything asked to.
    pub fn event_loop(&mut self, dt: f64) {
        if self.is_stopped() {
            return;
        }
        self.clock += dt;

        if let Some(line) = self.console_line.take() {
            if let Ok(output) = self.trigger_command(&line, true) {
                show_output(output);
            }
        }

        let clock = self.clock;
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.scheduled)
                .into_iter()
                .partition(|s| s.due <= clock);
        self.scheduled = pending;
        for command in due {
            if self.is_stopped() {
                break;
            }
            if let Ok(output) = self.trigger_command(&command.line, false) {
                show_output(output);
            }
        }

        self.state.tick_animation(dt);
        if self.state.take_render_request() {
            self.state.surface.render();
        }
    }

    /// Block, calling `callback` then [`event_loop`](Self::event_loop)
    /// every `interval` until stopped. The stop flag is only checked
    /// between iterations.
    pub fn start_with_callback(
        &mut self,
        interval: Duration,
        mut callback: impl FnMut(&mut Self),
    ) {
        log::debug!("Interactor: loop every {interval:?}");
        let mut last = Instant::now();
        while !self.is_stopped() {
            let started = Instant::now();
            callback(self);
            self.event_loop(started.duration_since(last).as_secs_f64());
            last = started;

            if let Some(rest) = interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    // ── Recording ────────────────────────────────────────────────────────

    /// Record routed events to `path` in the current log layout.
    pub fn record(&mut self, path: &Path) -> Result<(), InteractError> {
        self.record_with_version(path, StreamVersion::CURRENT)
    }

    /// Record routed events to `path` in the layout of `version`.
    pub fn record_with_version(
        &mut self,
        path: &Path,
        version: StreamVersion,
    ) -> Result<(), InteractError> {
        self.recorder.start_recording(path, version)
    }

    /// Close the log being written.
    pub fn stop_recording(&mut self) -> Result<(), InteractError> {
        self.recorder.stop()
    }

    fn record_event(&mut self, event: &InputEvent) {
        if !self.recorder.is_recording() {
            return;
        }
        if self.is_stop_hotkey(event) {
            log::debug!("Interactor: stop hotkey, recording off");
            if let Err(e) = self.recorder.stop() {
                log::error!("Interactor: {e}");
            }
            return;
        }
        let Some(record) =
            EventRecord::from_input(event, self.mouse_position, &self.modifiers)
        else {
            return;
        };
        if let Err(e) = self.recorder.write(&record) {
            log::error!("Interactor: {e}, recording off");
            let _ = self.recorder.stop();
        }
    }

    fn is_stop_hotkey(&self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyboardKey {
                action: InputAction::Press,
                key,
            } => {
                Bind::new(self.modifiers.current(), key_token(key))
                    == self.stop_hotkey
            }
            _ => false,
        }
    }

    /// Replay the log at `path`, running one event-loop tick of
    /// `1 / frame_rate` seconds after each event.
    pub fn play(
        &mut self,
        path: &Path,
        frame_rate: f64,
    ) -> Result<PlaybackSummary, InteractError> {
        let mut reader = LogReader::open(path)?;
        let dt = if frame_rate > 0.0 {
            frame_rate.recip()
        } else {
            log::warn!("Interactor: frame rate {frame_rate} ignored");
            0.0
        };

        log::info!("Interactor: playing {}", path.display());
        self.recorder.begin_playback()?;
        let mut events = 0;
        for record in reader.by_ref() {
            if self.is_stopped() {
                break;
            }
            self.replay(&record);
            self.event_loop(dt);
            events += 1;
        }
        self.recorder.end_playback();

        let summary = PlaybackSummary {
            events,
            skipped: reader.skipped(),
            version: reader.version(),
        };
        log::info!(
            "Interactor: replayed {} events, skipped {} lines",
            summary.events,
            summary.skipped
        );
        Ok(summary)
    }

    fn replay(&mut self, record: &EventRecord) {
        let _ = self.handle_event(InputEvent::ModifiersChanged {
            ctrl: record.ctrl,
            shift: record.shift,
            alt: record.alt,
        });
        self.mouse_position = (record.x, record.y);
        let _ = self.handle_event(record.to_input_event());
    }
}

fn show_output(output: Option<String>) {
    if let Some(text) = output {
        log::info!("{text}");
    }
}

impl std::fmt::Debug for Interactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interactor")
            .field("registry", &self.registry)
            .field("bindings", &self.bindings)
            .field("state", &self.state)
            .field("modifiers", &self.modifiers)
            .field("policy", &self.policy)
            .field("recorder", &self.recorder)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::command::CommandDoc;
    use crate::options::OptionValue;

    type Log = Rc<RefCell<Vec<String>>>;

    fn interactor() -> Interactor {
        Interactor::new(ViewerState::headless())
    }

    /// Adds a `log` command that appends its joined arguments to the log.
    fn with_log(interactor: &mut Interactor) -> Log {
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        interactor.registry_mut().add_command(
            "log",
            CommandDoc::new("Append to the test log"),
            move |_, args| {
                sink.borrow_mut().push(args.join("|"));
                Ok(None)
            },
        );
        log
    }

    fn press(key: &str) -> InputEvent {
        InputEvent::KeyboardKey {
            action: InputAction::Press,
            key: key.to_owned(),
        }
    }

    fn release(key: &str) -> InputEvent {
        InputEvent::KeyboardKey {
            action: InputAction::Release,
            key: key.to_owned(),
        }
    }

    fn modifiers(ctrl: bool, shift: bool) -> InputEvent {
        InputEvent::ModifiersChanged {
            ctrl,
            shift,
            alt: false,
        }
    }

    fn axis(interactor: &Interactor) -> OptionValue {
        interactor.state().options.get("ui.axis").unwrap()
    }

    #[test]
    fn key_press_runs_bound_commands() {
        let mut it = interactor();
        let report = it.handle_event(press("x")).unwrap();
        assert_eq!(report.bind, Bind::key("X"));
        assert_eq!(report.commands_run, 1);
        assert!(report.succeeded());
        assert_eq!(axis(&it), OptionValue::Bool(true));

        assert!(it.handle_event(release("x")).is_none());
        assert_eq!(axis(&it), OptionValue::Bool(true));
    }

    #[test]
    fn modifiers_select_the_bind() {
        let mut it = interactor();
        let _ = it.handle_event(modifiers(false, true));
        let report = it.handle_event(press("l")).unwrap();
        assert_eq!(report.bind, Bind::new(ModifierKeys::Shift, "L"));

        let _ = it.handle_event(modifiers(true, true));
        let report = it.handle_event(press("1")).unwrap();
        assert_eq!(report.bind, Bind::new(ModifierKeys::Any, "1"));
    }

    #[test]
    fn unbound_events_do_not_dispatch() {
        let mut it = interactor();
        assert!(it.handle_event(press("F1")).is_none());
        assert!(it
            .handle_event(InputEvent::MousePosition { x: 4, y: 5 })
            .is_none());
        assert_eq!(it.mouse_position(), (4, 5));
    }

    #[test]
    fn continue_and_fail_fast() {
        let mut it = interactor();
        let log = with_log(&mut it);
        it.bindings_mut()
            .add(Bind::key("W"), ["bogus", "log ran"], "Test", None);

        let report = it.handle_event(press("w")).unwrap();
        assert_eq!(report.commands_run, 2);
        assert!(matches!(
            report.failures.as_slice(),
            [InteractError::UnknownCommand { .. }]
        ));
        assert_eq!(*log.borrow(), ["ran"]);

        it.set_dispatch_policy(DispatchPolicy::FailFast);
        let report = it.handle_event(press("w")).unwrap();
        assert_eq!(report.commands_run, 1);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn dropped_paths_are_appended_quoted() {
        let mut it = interactor();
        let log = with_log(&mut it);
        it.bindings_mut()
            .add(Bind::key("Drop"), ["log dropped"], "Test", None);

        let report = it
            .handle_event(InputEvent::DropFiles {
                paths: vec!["/tmp/a b.obj".to_owned(), "c\"d.stl".to_owned()],
            })
            .unwrap();
        assert!(report.succeeded());
        assert_eq!(*log.borrow(), ["dropped|/tmp/a b.obj|c\"d.stl"]);
    }

    #[test]
    fn stop_is_terminal() {
        let mut it = interactor();
        let _ = it.handle_event(modifiers(true, false));
        let report = it.handle_event(press("q")).unwrap();
        assert!(report.succeeded());
        assert!(it.is_stopped());

        let _ = it.handle_event(modifiers(false, false));
        assert!(it.handle_event(press("x")).is_none());
        assert_eq!(axis(&it), OptionValue::Bool(false));
    }

    #[test]
    fn console_line_runs_on_next_tick() {
        let mut it = interactor();
        it.submit_console_line("toggle ui.axis # show axes");
        assert_eq!(axis(&it), OptionValue::Bool(false));
        it.event_loop(0.0);
        assert_eq!(axis(&it), OptionValue::Bool(true));
        it.event_loop(0.0);
        assert_eq!(axis(&it), OptionValue::Bool(true));
    }

    #[test]
    fn scheduled_commands_wait_for_their_delay() {
        let mut it = interactor();
        it.schedule_command(1.0, "stop_interactor");
        it.event_loop(0.6);
        assert!(!it.is_stopped());
        it.event_loop(0.6);
        assert!(it.is_stopped());
    }

    #[test]
    fn renders_once_per_requested_tick() {
        struct Counting(Rc<Cell<usize>>);
        impl RenderSurface for Counting {
            fn render(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let frames = Rc::new(Cell::new(0));
        let state = ViewerState::new(
            Box::new(crate::options::Options::default()),
            Box::new(Counting(Rc::clone(&frames))),
        );
        let mut it = Interactor::new(state);
        it.event_loop(0.1);
        assert_eq!(frames.get(), 0);

        let _ = it.trigger_command("toggle ui.fps", false).unwrap();
        it.event_loop(0.1);
        it.event_loop(0.1);
        assert_eq!(frames.get(), 1);
    }

    #[test]
    fn text_goes_to_the_sink_only() {
        let mut it = interactor();
        let typed = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&typed);
        it.set_text_sink(move |c| sink.borrow_mut().push(c));

        for c in "x!".chars() {
            assert!(it
                .handle_event(InputEvent::TextCharacter {
                    codepoint: u32::from(c)
                })
                .is_none());
        }
        assert_eq!(*typed.borrow(), "x!");
        assert_eq!(axis(&it), OptionValue::Bool(false));
    }

    #[test]
    fn start_with_callback_runs_until_stopped() {
        let mut it = interactor();
        let mut calls = 0;
        it.start_with_callback(Duration::from_millis(1), |it| {
            calls += 1;
            if calls == 3 {
                it.request_stop();
            }
        });
        assert_eq!(calls, 3);
        assert!(it.is_stopped());
    }

    fn record_session(path: &Path, version: StreamVersion) {
        let mut it = interactor();
        it.record_with_version(path, version).unwrap();
        let _ = it.handle_event(InputEvent::MousePosition { x: 10, y: 20 });
        let _ = it.handle_event(press("x"));
        let _ = it.handle_event(release("x"));
        let _ = it.handle_event(modifiers(false, true));
        let _ = it.handle_event(press("l"));
        it.stop_recording().unwrap();
    }

    fn replay_session(path: &Path) -> (Interactor, PlaybackSummary) {
        let mut it = interactor();
        let summary = it.play(path, 30.0).unwrap();
        (it, summary)
    }

    #[test]
    fn record_then_play_current_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        record_session(&path, StreamVersion::CURRENT);

        let (it, summary) = replay_session(&path);
        assert_eq!(summary.events, 4);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.version, StreamVersion::CURRENT);
        assert_eq!(axis(&it), OptionValue::Bool(true));
        assert_eq!(
            it.state().options.get("render.light.intensity").unwrap(),
            OptionValue::Double(0.98)
        );
        assert_eq!(it.mouse_position(), (10, 20));
        assert_eq!(it.recorder_state(), RecorderState::Idle);
    }

    #[test]
    fn record_then_play_legacy_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.log");
        record_session(&path, StreamVersion::LEGACY);
        assert!(!std::fs::read_to_string(&path)
            .unwrap()
            .starts_with("# StreamVersion"));

        let (it, summary) = replay_session(&path);
        assert_eq!(summary.events, 4);
        assert_eq!(summary.version, StreamVersion::LEGACY);
        assert_eq!(axis(&it), OptionValue::Bool(true));
        assert!(it.modifiers().shift());
    }

    /// Interactor whose binds under test also log their own name.
    fn traced() -> (Interactor, Log) {
        use crate::bindings::ModifierKeys::{Ctrl, Shift};

        let mut it = interactor();
        let log = with_log(&mut it);
        let table = it.bindings_mut();
        table.add(Bind::key("X"), ["toggle ui.axis", "log X"], "Test", None);
        table.add(
            Bind::new(Shift, "L"),
            ["decrease_light_intensity", "log Shift+L"],
            "Test",
            None,
        );
        table.add(
            Bind::new(Ctrl, "LeftButton"),
            ["log Ctrl+LeftButton"],
            "Test",
            None,
        );
        table.add(Bind::key("RightButton"), ["log RightButton"], "Test", None);
        table.add(
            Bind::key("WheelBackward"),
            ["log WheelBackward"],
            "Test",
            None,
        );
        table.add(Bind::key("Drop"), ["log Drop"], "Test", None);
        (it, log)
    }

    fn traced_session(path: &Path, version: StreamVersion) -> Vec<String> {
        use crate::input::{MouseButton, WheelDirection};

        let click = |action, button| InputEvent::MouseButton { action, button };
        let (mut it, log) = traced();
        it.record_with_version(path, version).unwrap();
        let events = [
            InputEvent::MousePosition { x: 10, y: 20 },
            press("x"),
            release("x"),
            modifiers(true, false),
            click(InputAction::Press, MouseButton::Left),
            click(InputAction::Release, MouseButton::Left),
            modifiers(false, false),
            click(InputAction::Press, MouseButton::Right),
            InputEvent::MouseWheel {
                direction: WheelDirection::Backward,
            },
            modifiers(false, true),
            press("l"),
            modifiers(false, false),
            InputEvent::DropFiles {
                paths: vec![
                    "/tmp/my model.obj".to_owned(),
                    "b.stl".to_owned(),
                ],
            },
        ];
        for event in events {
            let _ = it.handle_event(event);
        }
        it.stop_recording().unwrap();
        log.take()
    }

    fn assert_replay_matches_live(version: StreamVersion) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traced.log");
        let live = traced_session(&path, version);
        assert_eq!(
            live,
            [
                "X",
                "Ctrl+LeftButton",
                "RightButton",
                "WheelBackward",
                "Shift+L",
                "Drop|/tmp/my model.obj|b.stl",
            ]
        );

        let (mut it, log) = traced();
        let summary = it.play(&path, 30.0).unwrap();
        assert_eq!(summary.skipped, 0);
        assert_eq!(*log.borrow(), live);
        assert_eq!(axis(&it), OptionValue::Bool(true));
    }

    #[test]
    fn replay_dispatches_like_the_live_session() {
        assert_replay_matches_live(StreamVersion::CURRENT);
    }

    #[test]
    fn legacy_replay_dispatches_like_the_live_session() {
        assert_replay_matches_live(StreamVersion::LEGACY);
    }

    #[test]
    fn stop_hotkey_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stop.log");
        let mut it = interactor();
        it.record(&path).unwrap();
        let _ = it.handle_event(press("x"));
        let _ = it.handle_event(modifiers(true, false));
        let _ = it.handle_event(press("q"));
        assert_eq!(it.recorder_state(), RecorderState::Idle);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains(" q "));
    }

    #[test]
    fn playback_is_not_rerecorded() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.log");
        record_session(&source, StreamVersion::CURRENT);

        let target = dir.path().join("target.log");
        let mut it = interactor();
        it.record(&target).unwrap();
        let _ = it.play(&source, 60.0).unwrap();
        let _ = it.handle_event(press("x"));
        let text = std::fs::read_to_string(&target).unwrap();
        assert_eq!(text, "# StreamVersion 1.1\n");
    }

    #[test]
    fn playing_a_missing_log_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = interactor()
            .play(&dir.path().join("missing.log"), 30.0)
            .unwrap_err();
        assert!(matches!(err, InteractError::RecorderIo { .. }));
    }

    #[test]
    fn bind_queries_use_live_state() {
        let mut it = interactor();
        assert_eq!(it.binding_type(&Bind::key("X")), BindingType::Toggle);
        let _ = it.handle_event(press("x"));
        assert_eq!(
            it.binding_documentation(&Bind::key("X")).unwrap().value,
            "ON"
        );
    }
}
