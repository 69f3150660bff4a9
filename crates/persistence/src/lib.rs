//! Loyalty Persistence - client-local store backed by SQLite

pub mod sqlite;
pub mod store;

pub use sqlite::Database;
pub use store::{CachedList, ClientStore, StoreKey};
