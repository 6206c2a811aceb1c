pub mod store;
pub mod sqlite;
pub mod ledger;

pub use store::{KeyValueStore, MemoryStore};
pub use sqlite::SqliteStore;
pub use ledger::ClaimLedger;
