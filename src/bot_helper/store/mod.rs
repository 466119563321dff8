//! # Persistence Gateway
//!
//! The [`DataStore`] trait is the only way the rest of the crate reaches
//! durable storage. A store hands out a whole [`Book`] on `load` and takes a
//! whole [`Book`] back on `save`; the API layer keeps the book in memory in
//! between and saves after every mutation.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory
//! - [`memory::InMemoryStore`]: keeps the last saved book in memory, for tests
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data-dir>/
//! ├── contacts.json   # JSON array of contacts
//! ├── notes.json      # { "notes": [...], "next_seq": n }
//! └── config.json     # user settings, see crate::config
//! ```
//!
//! A missing file is an empty collection. Anything else that goes wrong is
//! reported as [`BotError::Persistence`](crate::error::BotError::Persistence)
//! and the API decides whether to carry on with an empty book.

use crate::book::Book;
use crate::error::Result;

pub mod fs;
pub mod memory;

pub trait DataStore {
    /// Reads both collections.
    fn load(&self) -> Result<Book>;

    /// Replaces the stored collections with `book`.
    fn save(&mut self, book: &Book) -> Result<()>;
}
