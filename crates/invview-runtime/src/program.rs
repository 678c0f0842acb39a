#![forbid(unsafe_code)]

//! Bubbletea/Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop, handling events and
//! rendering frames. It separates state (Model) from rendering (View) and
//! provides a command pattern for side effects.
//!
//! # Example
//!
//! ```ignore
//! use invview_runtime::program::{Cmd, Model};
//! use invview_core::event::Event;
//! use invview_render::frame::Frame;
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             _ => Msg::Increment,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
//!         match msg {
//!             Msg::Increment => { self.count += 1; Cmd::none() }
//!             Msg::Quit => Cmd::quit(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         frame.print(0, 0, &self.count.to_string(), Default::default(), frame.width());
//!     }
//! }
//! ```

use std::io::{self, BufWriter, Stdout};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use invview_core::event::Event;
use invview_core::terminal_session::{SessionOptions, TerminalSession};
use invview_render::buffer::Buffer;
use invview_render::diff::BufferDiff;
use invview_render::frame::Frame;
use invview_render::presenter::Presenter;
use tracing::{debug, debug_span, info, info_span, warn};

/// Poll timeout when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The Model trait defines application state and behavior.
///
/// Implementations define how the application responds to events
/// and renders its current state.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Messages represent actions that update the model state.
    /// Must be convertible from terminal events.
    type Message: From<Event> + Send + 'static;

    /// Initialize the model with startup commands.
    ///
    /// Called once when the program starts.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns commands
    /// for any side effects that should be executed.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);
}

/// Metadata for background tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSpec {
    /// Optional task name for tracing.
    pub name: Option<String>,
}

impl TaskSpec {
    /// Attach a task name for diagnostics.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Commands represent side effects to be executed by the runtime.
///
/// Commands are returned from `init()` and `update()` to trigger
/// actions like quitting, sending messages, or scheduling ticks.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Quit the application.
    Quit,
    /// Execute multiple commands in order.
    Batch(Vec<Cmd<M>>),
    /// Send a message to the model.
    Msg(M),
    /// Deliver `Event::Tick` at this interval from now on.
    Tick(Duration),
    /// Execute a blocking operation on a background thread.
    ///
    /// The return value is sent back as a message to the model.
    Task(TaskSpec, Box<dyn FnOnce() -> M + Send>),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Tick(d) => f.debug_tuple("Tick").field(d).finish(),
            Self::Task(spec, _) => f.debug_struct("Task").field("spec", spec).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a tick command.
    #[inline]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }

    /// Create a batch of commands, collapsing trivial cases.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.swap_remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Create a background task command.
    ///
    /// The closure runs on a spawned thread. When it completes, the returned
    /// message is sent back to the model's `update()`.
    pub fn task<F>(f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(TaskSpec::default(), Box::new(f))
    }

    /// Create a named background task command.
    pub fn task_named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(TaskSpec::default().with_name(name), Box::new(f))
    }

    /// Return a stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Tick(_) => "Tick",
            Self::Task(..) => "Task",
        }
    }

    /// Count the number of atomic commands in this command.
    ///
    /// Returns 0 for None, 1 for atomic commands, and recursively counts
    /// batches.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}

/// Configuration for the interactive program.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Enable bracketed paste.
    pub bracketed_paste: bool,
    /// Quit automatically after this long (smoke tests, demos).
    pub exit_after: Option<Duration>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            bracketed_paste: true,
            exit_after: None,
        }
    }
}

/// The interactive program: owns the terminal and drives a [`Model`].
pub struct Program<M: Model> {
    model: M,
    session: TerminalSession,
    presenter: Presenter<BufWriter<Stdout>>,
    previous: Option<Buffer>,
    width: u16,
    height: u16,
    running: bool,
    dirty: bool,
    tick_rate: Option<Duration>,
    last_tick: Instant,
    started: Instant,
    exit_after: Option<Duration>,
    task_sender: mpsc::Sender<M::Message>,
    task_receiver: mpsc::Receiver<M::Message>,
    task_handles: Vec<JoinHandle<()>>,
}

impl<M: Model> Program<M> {
    /// Take over the terminal.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: config.alternate_screen,
            bracketed_paste: config.bracketed_paste,
        })?;
        let (width, height) = session.size()?;
        let (task_sender, task_receiver) = mpsc::channel();
        let now = Instant::now();

        Ok(Self {
            model,
            session,
            presenter: Presenter::new(BufWriter::new(io::stdout())),
            previous: None,
            width,
            height,
            running: true,
            dirty: true,
            tick_rate: None,
            last_tick: now,
            started: now,
            exit_after: config.exit_after,
            task_sender,
            task_receiver,
            task_handles: Vec::new(),
        })
    }

    /// Run until the model quits.
    pub fn run(&mut self) -> io::Result<()> {
        let cmd = {
            let _span = info_span!("invview.program.init").entered();
            self.model.init()
        };
        self.execute_cmd(cmd)?;
        self.render_frame()?;

        while self.running {
            if self
                .exit_after
                .is_some_and(|limit| self.started.elapsed() >= limit)
            {
                info!("exit-after deadline reached");
                break;
            }

            if self.session.poll_event(self.effective_timeout())? {
                loop {
                    if let Some(event) = self.session.read_event()? {
                        self.handle_event(event)?;
                    }
                    if !self.running || !self.session.poll_event(Duration::ZERO)? {
                        break;
                    }
                }
            }

            self.process_task_results()?;
            self.reap_finished_tasks();

            if self.should_tick() {
                self.last_tick = Instant::now();
                self.dispatch(M::Message::from(Event::Tick), "Tick")?;
            }

            if self.dirty && self.running {
                self.render_frame()?;
            }
        }

        info!(pending_tasks = self.task_handles.len(), "program loop finished");
        Ok(())
    }

    fn effective_timeout(&self) -> Duration {
        let mut timeout = match self.tick_rate {
            Some(rate) => rate.saturating_sub(self.last_tick.elapsed()),
            None => IDLE_POLL,
        };
        if let Some(limit) = self.exit_after {
            timeout = timeout.min(limit.saturating_sub(self.started.elapsed()));
        }
        timeout
    }

    fn should_tick(&self) -> bool {
        self.tick_rate
            .is_some_and(|rate| self.last_tick.elapsed() >= rate)
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        if let Event::Resize { width, height } = event {
            self.width = width;
            self.height = height;
            self.previous = None;
            self.presenter.clear_screen()?;
        }
        self.dispatch(M::Message::from(event), "Event")
    }

    fn dispatch(&mut self, msg: M::Message, msg_type: &'static str) -> io::Result<()> {
        let cmd = {
            let _span = debug_span!("invview.program.update", msg_type).entered();
            let start = Instant::now();
            let cmd = self.model.update(msg);
            debug!(
                duration_us = start.elapsed().as_micros() as u64,
                cmd_type = cmd.type_name(),
                "update"
            );
            cmd
        };
        self.dirty = true;
        self.execute_cmd(cmd)
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) -> io::Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.dispatch(m, "Msg")?,
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c)?;
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(duration) => {
                self.tick_rate = Some(duration);
                self.last_tick = Instant::now();
            }
            Cmd::Task(spec, f) => {
                debug!(task = spec.name.as_deref().unwrap_or("<unnamed>"), "spawning task");
                let sender = self.task_sender.clone();
                let handle = std::thread::spawn(move || {
                    let msg = f();
                    // The receiver is gone only after the program has shut down.
                    let _ = sender.send(msg);
                });
                self.task_handles.push(handle);
            }
        }
        Ok(())
    }

    fn process_task_results(&mut self) -> io::Result<()> {
        while let Ok(msg) = self.task_receiver.try_recv() {
            self.dispatch(msg, "Task")?;
            if !self.running {
                break;
            }
        }
        Ok(())
    }

    fn reap_finished_tasks(&mut self) {
        if self.task_handles.is_empty() {
            return;
        }

        let mut remaining = Vec::with_capacity(self.task_handles.len());
        for handle in self.task_handles.drain(..) {
            if handle.is_finished() {
                if let Err(payload) = handle.join() {
                    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
                        (*s).to_owned()
                    } else if let Some(s) = payload.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic payload".to_owned()
                    };
                    warn!("spawned task panicked: {msg}");
                }
            } else {
                remaining.push(handle);
            }
        }
        self.task_handles = remaining;
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let _span = debug_span!("invview.program.render", width = self.width, height = self.height)
            .entered();
        let mut frame = Frame::new(self.width, self.height);
        self.model.view(&mut frame);

        let diff = match &self.previous {
            Some(prev) => BufferDiff::compute(prev, &frame.buffer),
            None => BufferDiff::full(&frame.buffer),
        };
        self.presenter
            .present(&frame.buffer, &diff, frame.cursor())?;
        self.previous = Some(frame.buffer);
        self.dirty = false;
        Ok(())
    }
}
