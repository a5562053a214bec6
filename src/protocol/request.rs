//! protocol::request
//!
//! Per-operation request types.
//!
//! # Design
//!
//! Both transports converge on these types: the URL-scheme transport builds
//! them from flat parameters via [`crate::protocol::params::FlatParams`], the
//! REST transport deserializes the payload halves straight from JSON bodies
//! (note the `new-name` wire key on [`RenamePayload`]).
//!
//! Requests carry `Option` fields wherever a caller could omit a value.
//! Binding never rejects an incomplete request; required-field absence is
//! surfaced as `MissingParameter` by the operation logic so tests can
//! distinguish "malformed" from "logically invalid".

use serde::Deserialize;

/// Enumerate all changelists of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Project identifier.
    pub project: String,
}

/// Fetch a single changelist by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    /// Project identifier.
    pub project: String,
    /// Changelist name; `None` is rejected by the operation.
    pub name: Option<String>,
}

/// Create a changelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    /// Project identifier.
    pub project: String,
    /// Creation payload.
    pub payload: AddPayload,
}

/// Payload of [`AddRequest`]; also the POST body shape of the REST transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddPayload {
    /// Name of the changelist to create.
    pub name: Option<String>,
    /// Initial comment; defaults to empty.
    pub comment: Option<String>,
    /// Whether to activate the new changelist. Omitted means activate.
    pub active: Option<bool>,
}

/// Edit a changelist's comment and/or activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// Project identifier.
    pub project: String,
    /// Changelist to edit; `None` is rejected by the operation.
    pub name: Option<String>,
    /// Edit payload.
    pub payload: EditPayload,
}

/// Payload of [`EditRequest`]; also the PUT body shape of the REST transport.
///
/// `active` semantics: `Some(false)` is a deactivation attempt (rejected when
/// the target is the active changelist), anything else activates the target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditPayload {
    /// New comment, if changing.
    pub comment: Option<String>,
    /// Activation flag.
    pub active: Option<bool>,
}

impl EditPayload {
    /// The payload the `activate` verb binds to: activation only, no comment.
    pub fn activate() -> Self {
        Self {
            comment: None,
            active: Some(true),
        }
    }
}

/// Rename a changelist, optionally editing comment/activation first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    /// Project identifier.
    pub project: String,
    /// Changelist to rename; `None` is rejected by the operation.
    pub name: Option<String>,
    /// Rename payload.
    pub payload: RenamePayload,
}

/// Payload of [`RenameRequest`]; also the POST-with-name body shape of the
/// REST transport. The new name travels under the `new-name` wire key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenamePayload {
    /// The new changelist name.
    #[serde(rename = "new-name")]
    pub new_name: Option<String>,
    /// New comment, if changing.
    pub comment: Option<String>,
    /// Activation flag, same semantics as [`EditPayload::active`].
    pub active: Option<bool>,
}

impl RenamePayload {
    /// The comment/activation half of the payload, applied before the rename.
    pub fn edits(&self) -> EditPayload {
        EditPayload {
            comment: self.comment.clone(),
            active: self.active,
        }
    }
}

/// Remove a changelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveRequest {
    /// Project identifier.
    pub project: String,
    /// Changelist to remove; `None` is rejected by the operation.
    pub name: Option<String>,
}
