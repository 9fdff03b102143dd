//! Persistence layer - one JSON document shared by every repository
//!
//! The document has exactly three named collections (`banks`, `customers`,
//! `users`). This module knows that shape and nothing about the records
//! inside it; each domain repository decodes its own slot. [`FileStore`]
//! mediates every access: shared reads hand out defensive copies, and a
//! mutation holds the exclusive lock for the whole
//! read-modify-write-persist sequence.
//!
//! # Example
//!
//! ```no_run
//! use teller::store::{FileStore, Slot};
//!
//! let store = FileStore::open("db/database.json")?;
//! let users = store.read(Slot::Users);
//! # Ok::<(), teller::Error>(())
//! ```

pub mod document;
pub mod file;

pub use document::{Document, Slot};
pub use file::FileStore;
