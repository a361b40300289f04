//! Command parsing and execution pipeline
//!
//! A raw input line becomes a `Command`, and the executor applies it to
//! the world, collecting every resulting message in an `Outbox`.

pub mod executor;
pub mod parser;

pub use executor::CommandExecutor;
pub use parser::{parse_line, Command};
