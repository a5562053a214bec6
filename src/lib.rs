//! Changelist Gateway - URL-scheme and REST access to project changelists
//!
//! The gateway lets external callers manipulate a project's named changelists
//! (logical groupings of pending file edits in a version-control workflow):
//! list them, fetch one, create, rename, edit metadata, (de)activate, and
//! delete, with optional success/failure callback notification for the
//! URL-scheme transport.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to transports)
//! - [`protocol`] - Request types, parameter binding, target dispatch, operation logic
//! - [`scheme`] - URL-scheme transport (`changelist/<verb>?key=value&...`)
//! - [`rest`] - REST transport (`/changelist/{project}[/{name}]`)
//! - [`store`] - Bundled in-memory implementation of the store collaborators
//! - [`callback`] - Callback invoker abstraction and system implementation
//! - [`config`] - TOML configuration (default changelist name, bind address, timeouts)
//!
//! # Correctness Invariants
//!
//! The gateway maintains the following invariants:
//!
//! 1. Exactly one changelist per project is active whenever changelists are enabled
//! 2. The active changelist can be neither deactivated nor deleted
//! 3. Changelist names are unique within a project; collisions are rejected
//! 4. Failed operations leave the store untouched, with the one documented
//!    exception of rename's edit-before-collision-check ordering

pub mod callback;
pub mod cli;
pub mod config;
pub mod protocol;
pub mod rest;
pub mod scheme;
pub mod store;
