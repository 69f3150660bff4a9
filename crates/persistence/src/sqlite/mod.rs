//! SQLite database management

mod client_store;
mod connection;

pub use client_store::*;
pub use connection::Database;
