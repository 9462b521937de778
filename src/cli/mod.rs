//! CLI command handling module
//!
//! Handles CLI subcommands and logging setup.

mod commands;
mod logging;

pub use commands::{handle_check, handle_dump, read_snapshot};
pub use logging::init_logging;
