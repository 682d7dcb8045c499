//! Maintenance command line for flatcache directories
//!
//! The binary is a thin shell around [`commands::run`]; everything it does is
//! reachable from here so it can be tested without spawning a process.

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Cli, Commands};
pub use commands::{run, CommandStatus};
pub use logging::{init_logging, VerbosityLevel};
