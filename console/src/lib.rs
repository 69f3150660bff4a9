//! Loyalty Console - terminal front end for tier and coupon administration

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod prompt;
mod state;

pub use cli::{run, Cli};
pub use error::{CliError, CliResult};
pub use state::AppState;
