//! # Entity store
//!
//! The transactional table set: accounts, characters, buildings,
//! regions, ongoing operations, ground loot, building inventories,
//! damage lists, prize counters, and trade orders.
//!
//! Mutating a row means checking out a `Handle<T>`, which exclusively
//! removes the row from its table until the handle is dropped; dropping
//! the handle writes the row back (`discard()` is the explicit opt-out
//! for callers deleting the row outright). A real deployment backs this
//! with a SQL or transactional key/value store; `Store` here is the
//! in-memory reference implementation every other crate and the test
//! suite builds against.

pub mod domain;
mod handle;
mod store;
mod tables;

pub use domain::*;
pub use handle::Handle;
pub use store::Store;
