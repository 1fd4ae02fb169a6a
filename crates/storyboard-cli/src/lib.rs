mod args;
mod commands;
mod logging;
mod output;
pub mod types;

pub use args::Cli;
pub use commands::run;
