//! Command line interface for ftsmachine.

pub mod args;
pub mod commands;
pub mod output;

pub use args::*;
pub use commands::*;
