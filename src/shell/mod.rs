//! External command execution.

pub mod command;

pub use command::{
    execute_streaming, resolve_program, CommandRunner, Invocation, OutputChunk, StreamingRunner,
};
