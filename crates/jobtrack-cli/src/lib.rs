//! Library side of the `jobtrack` command: arguments, command handlers,
//! logging setup and input loading.

pub mod cli;
pub mod commands;
pub mod input;
pub mod logging;
