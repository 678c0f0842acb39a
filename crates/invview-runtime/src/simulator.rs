#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] without a real terminal, enabling
//! deterministic snapshot testing, event injection, and frame capture.
//!
//! Background tasks run synchronously by default. With
//! [`defer_tasks`](ProgramSimulator::defer_tasks) they are parked instead, so
//! a test can complete them later and in any order; this is how overlapping
//! requests are exercised.
//!
//! # Example
//!
//! ```ignore
//! use invview_runtime::simulator::ProgramSimulator;
//!
//! let mut sim = ProgramSimulator::new(Counter { value: 0 });
//! sim.init();
//! sim.send(Msg::Increment);
//! assert_eq!(sim.model().value, 1);
//!
//! let buf = sim.capture_frame(80, 24);
//! // Assert on buffer contents...
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use crate::program::{Cmd, Model, TaskSpec};
use invview_core::event::Event;
use invview_render::buffer::Buffer;
use invview_render::frame::Frame;

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Quit command.
    Quit,
    /// Message sent to model (not stored, just noted).
    Msg,
    /// Batch of commands.
    Batch(usize),
    /// Tick scheduled.
    Tick(Duration),
    /// Background task executed or parked.
    Task(Option<String>),
}

type PendingTask<Msg> = (TaskSpec, Box<dyn FnOnce() -> Msg + Send>);

/// Deterministic simulator for [`Model`] testing.
///
/// Runs model logic without any terminal or IO dependencies. Events can be
/// injected, messages sent directly, and frames captured for snapshot testing.
pub struct ProgramSimulator<M: Model> {
    model: M,
    frames: Vec<Buffer>,
    command_log: Vec<CmdRecord>,
    running: bool,
    tick_rate: Option<Duration>,
    defer_tasks: bool,
    pending: VecDeque<PendingTask<M::Message>>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            frames: Vec::new(),
            command_log: Vec::new(),
            running: true,
            tick_rate: None,
            defer_tasks: false,
            pending: VecDeque::new(),
        }
    }

    /// Park background tasks instead of running them inline.
    pub fn defer_tasks(&mut self, defer: bool) {
        self.defer_tasks = defer;
    }

    /// Initialize the model by calling `Model::init()` and executing returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Inject terminal events into the model.
    ///
    /// Each event is converted to a message via `From<Event>` and dispatched
    /// through `Model::update()`. Commands returned from update are executed.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            let msg = M::Message::from(event.clone());
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
    }

    /// Inject a single terminal event into the model.
    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Deliver `n` tick events.
    pub fn tick(&mut self, n: usize) {
        for _ in 0..n {
            self.inject_event(Event::Tick);
        }
    }

    /// Send a specific message to the model.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Number of parked background tasks.
    pub fn pending_tasks(&self) -> usize {
        self.pending.len()
    }

    /// Run the parked task at `index` (0 = oldest) and dispatch its message.
    ///
    /// Returns `false` if there is no such task.
    pub fn complete_task(&mut self, index: usize) -> bool {
        let Some((_, f)) = self.pending.remove(index) else {
            return false;
        };
        let msg = f();
        self.send(msg);
        true
    }

    /// Run every parked task, oldest first, including any they spawn.
    pub fn run_pending_tasks(&mut self) {
        while self.complete_task(0) {}
    }

    /// Capture the current frame at the given dimensions.
    ///
    /// Calls `Model::view()` to render into a fresh buffer and stores the
    /// result. Returns a reference to the captured buffer.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.frames.push(frame.buffer);
        &self.frames[self.frames.len() - 1]
    }

    /// Get all captured frame buffers.
    pub fn frames(&self) -> &[Buffer] {
        &self.frames
    }

    /// Get the most recently captured frame buffer, if any.
    pub fn last_frame(&self) -> Option<&Buffer> {
        self.frames.last()
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Check if the simulated program is still running.
    ///
    /// Returns `false` after a `Cmd::Quit` has been executed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the current tick rate (if any).
    pub fn tick_rate(&self) -> Option<Duration> {
        self.tick_rate
    }

    /// Get the command execution log.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(duration) => {
                self.tick_rate = Some(duration);
                self.command_log.push(CmdRecord::Tick(duration));
            }
            Cmd::Task(spec, f) => {
                self.command_log.push(CmdRecord::Task(spec.name.clone()));
                if self.defer_tasks {
                    self.pending.push_back((spec, f));
                } else {
                    let msg = f();
                    let cmd = self.model.update(msg);
                    self.execute_cmd(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: i32,
        initialized: bool,
    }

    #[derive(Debug)]
    enum CounterMsg {
        Increment,
        Decrement,
        Reset,
        Quit,
        BatchIncrement(usize),
        SpawnTask,
    }

    impl From<Event> for CounterMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(k) if k.is_char('+') => CounterMsg::Increment,
                Event::Key(k) if k.is_char('-') => CounterMsg::Decrement,
                Event::Key(k) if k.is_char('q') => CounterMsg::Quit,
                _ => CounterMsg::Reset,
            }
        }
    }

    impl Model for Counter {
        type Message = CounterMsg;

        fn init(&mut self) -> Cmd<Self::Message> {
            self.initialized = true;
            Cmd::tick(Duration::from_millis(100))
        }

        fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
            match msg {
                CounterMsg::Increment => {
                    self.value += 1;
                    Cmd::none()
                }
                CounterMsg::Decrement => {
                    self.value -= 1;
                    Cmd::none()
                }
                CounterMsg::Reset => {
                    self.value = 0;
                    Cmd::none()
                }
                CounterMsg::Quit => Cmd::quit(),
                CounterMsg::BatchIncrement(n) => {
                    Cmd::Batch((0..n).map(|_| Cmd::msg(CounterMsg::Increment)).collect())
                }
                CounterMsg::SpawnTask => Cmd::task_named("bump", || CounterMsg::Increment),
            }
        }

        fn view(&self, frame: &mut Frame) {
            let text = format!("Count: {}", self.value);
            frame.print(0, 0, &text, Default::default(), frame.width());
        }
    }

    fn counter() -> Counter {
        Counter {
            value: 0,
            initialized: false,
        }
    }

    fn key(c: char) -> Event {
        Event::Key(invview_core::event::KeyEvent::new(
            invview_core::event::KeyCode::Char(c),
        ))
    }

    #[test]
    fn init_runs_and_schedules_tick() {
        let mut sim = ProgramSimulator::new(counter());
        sim.init();
        assert!(sim.model().initialized);
        assert_eq!(sim.tick_rate(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn events_map_to_messages() {
        let mut sim = ProgramSimulator::new(counter());
        sim.inject_events(&[key('+'), key('+'), key('-')]);
        assert_eq!(sim.model().value, 1);
    }

    #[test]
    fn quit_stops_processing() {
        let mut sim = ProgramSimulator::new(counter());
        sim.inject_events(&[key('+'), key('q'), key('+')]);
        assert!(!sim.is_running());
        assert_eq!(sim.model().value, 1);
        sim.send(CounterMsg::Increment);
        assert_eq!(sim.model().value, 1);
    }

    #[test]
    fn batch_runs_every_message() {
        let mut sim = ProgramSimulator::new(counter());
        sim.send(CounterMsg::BatchIncrement(3));
        assert_eq!(sim.model().value, 3);
        assert!(sim.command_log().contains(&CmdRecord::Batch(3)));
        assert_eq!(
            sim.command_log()
                .iter()
                .filter(|r| **r == CmdRecord::Msg)
                .count(),
            3
        );
    }

    #[test]
    fn tasks_run_inline_by_default() {
        let mut sim = ProgramSimulator::new(counter());
        sim.send(CounterMsg::SpawnTask);
        assert_eq!(sim.model().value, 1);
        assert_eq!(sim.pending_tasks(), 0);
        assert!(
            sim.command_log()
                .contains(&CmdRecord::Task(Some("bump".into())))
        );
    }

    #[test]
    fn deferred_tasks_wait_for_completion() {
        let mut sim = ProgramSimulator::new(counter());
        sim.defer_tasks(true);
        sim.send(CounterMsg::SpawnTask);
        sim.send(CounterMsg::SpawnTask);
        assert_eq!(sim.model().value, 0);
        assert_eq!(sim.pending_tasks(), 2);

        assert!(sim.complete_task(1));
        assert_eq!(sim.model().value, 1);
        sim.run_pending_tasks();
        assert_eq!(sim.model().value, 2);
        assert!(!sim.complete_task(0));
    }

    #[test]
    fn capture_frame_renders_view() {
        let mut sim = ProgramSimulator::new(counter());
        sim.send(CounterMsg::Increment);
        let buf = sim.capture_frame(20, 2);
        assert_eq!(buf.row_text(0), "Count: 1");
        assert_eq!(sim.frames().len(), 1);
        assert!(sim.last_frame().is_some());
    }

    #[test]
    fn tick_delivers_tick_events() {
        let mut sim = ProgramSimulator::new(counter());
        sim.send(CounterMsg::Increment);
        sim.tick(1);
        // Tick maps to Reset in this model.
        assert_eq!(sim.model().value, 0);
    }
}
