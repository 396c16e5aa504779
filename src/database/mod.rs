//! Translator durable storage layer.
//!
//! Provides the [`DurableStorage`] key/value seam, its SQLite implementation
//! ([`Database`]) and an in-memory implementation ([`MemoryStorage`]).
//!
//! # Usage
//!
//! ```no_run
//! use translator_client::database::{Database, DurableStorage};
//!
//! let mut db = Database::open("translator.db").expect("failed to open database");
//! db.set_item("translator_data", "{}").expect("write failed");
//! assert_eq!(db.get_item("translator_data").unwrap().as_deref(), Some("{}"));
//! ```

pub mod connection;
pub mod migrations;
pub mod storage;

pub use connection::Database;
pub use storage::{DurableStorage, MemoryStorage};
