#![forbid(unsafe_code)]

//! Runtime: the update/view loop and its deterministic test double.

pub mod program;
pub mod simulator;

pub use program::{Cmd, Model, Program, ProgramConfig, TaskSpec};
pub use simulator::{CmdRecord, ProgramSimulator};
