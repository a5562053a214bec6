//! protocol
//!
//! The request-binding, target-dispatch, and validation engine.
//!
//! # Responsibilities
//!
//! - Define the closed set of operation outcomes ([`result`])
//! - Define the per-operation request types both transports converge on
//!   ([`request`])
//! - Bind flat key-value parameters from the URL-scheme transport ([`params`];
//!   the REST transport binds via serde on the payload types directly)
//! - Resolve projects, enforce cross-cutting preconditions, and run the six
//!   operations against the changelist store ([`targets`])
//!
//! Transport concerns (HTTP status codes, callback firing, message vs. JSON
//! projection) live in [`crate::rest`] and [`crate::scheme`]; everything here
//! is transport-independent.

pub mod params;
pub mod request;
pub mod result;
pub mod store;
pub mod targets;

pub use params::FlatParams;
pub use request::{
    AddPayload, AddRequest, EditPayload, EditRequest, GetRequest, ListRequest, RemoveRequest,
    RenamePayload, RenameRequest,
};
pub use result::{TargetError, TargetResult};
pub use store::{Changelist, ChangelistStore, LocateError, ProjectLocator};
pub use targets::{ChangelistList, Dispatcher, WriteRequest};
