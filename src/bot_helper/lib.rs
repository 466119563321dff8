//! # bot-helper Architecture
//!
//! bot-helper is a personal assistant library: an address book, a note book
//! and a file sorter. The command-line client in `main.rs` is one UI on top
//! of it; nothing below the CLI knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, sets the exit code    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the loaded Book, saves after each mutation          │
//! │  - Turns selector words into Selectors                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per operation, returns CmdResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (book, search, sort, model, fields)                   │
//! │  - Validation, collections, ranking and ordering            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: load / save a whole Book                │
//! │  - FileStore (JSON files), InMemoryStore (tests)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The file sorter ([`classify`]) works directly on the filesystem and is
//! reached through the same API.
//!
//! ## Selecting records
//!
//! Users name records by 1-based list position, by UUID or, for contacts,
//! by name. See [`selector`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per command group
//! - [`book`]: The collection store (`AddressBook`, `NoteBook`)
//! - [`search`]: Ranked substring search
//! - [`sort`]: Stable sorting and upcoming birthdays
//! - [`model`]: `Contact` and `Note`
//! - [`fields`]: Field validators and validated newtypes
//! - [`store`]: Persistence gateway and implementations
//! - [`classify`]: The file sorter
//! - [`config`]: User settings
//! - [`logging`]: Logger bootstrap
//! - [`error`]: Error types

pub mod api;
pub mod book;
pub mod classify;
pub mod commands;
pub mod config;
pub mod error;
pub mod fields;
pub mod init;
pub mod logging;
pub mod model;
pub mod search;
pub mod selector;
pub mod sort;
pub mod store;
