//! store
//!
//! Bundled implementations of the store collaborators.
//!
//! The engine only depends on the [`crate::protocol::ProjectLocator`] and
//! [`crate::protocol::ChangelistStore`] traits; this module supplies the
//! in-memory implementation that backs the bundled server binary and the
//! test suite.

pub mod memory;

pub use memory::{MemoryChangelists, MemoryLocator};
