pub mod commands;
pub mod output;
pub mod validate;

pub use commands::{Cli, Commands, LogFormat};
