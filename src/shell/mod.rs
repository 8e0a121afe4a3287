//! External command execution.

pub mod command;
pub mod platform;
pub mod scripted;

pub use command::{
    execute, CommandExecutor, CommandOptions, CommandOutcome, CommandSpec, SystemExecutor,
};
pub use platform::{is_ci, shell_flag, shell_program};
pub use scripted::{ScriptedCall, ScriptedExecutor};
