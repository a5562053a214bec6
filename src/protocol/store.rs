//! protocol::store
//!
//! Collaborator traits for project resolution and changelist storage, plus
//! the changelist record the engine observes.
//!
//! # Design
//!
//! The engine never owns changelist state. It resolves a project identifier
//! through a [`ProjectLocator`] (async, since resolution may involve I/O) and
//! then reads and mutates changelists through the [`ChangelistStore`] handle
//! the locator returns. Store calls are synchronous and assumed internally
//! consistent for a single call; the engine opens no transaction and adds no
//! locking of its own.
//!
//! Store mutators are infallible and may no-op on unknown names: operations
//! validate existence before mutating, so validation ownership stays in the
//! engine.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single changelist record as observed by the engine.
///
/// # JSON shape
///
/// `active` and `readOnly` are serialized only when true; `comment` is always
/// present, as a string or `null`:
///
/// ```
/// use changelist_gateway::protocol::Changelist;
///
/// let record = Changelist {
///     name: "feature".to_string(),
///     active: true,
///     read_only: false,
///     comment: Some("wip".to_string()),
/// };
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(
///     json,
///     serde_json::json!({"name": "feature", "active": true, "comment": "wip"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelist {
    /// Unique (within the project) changelist name.
    pub name: String,

    /// Whether this is the active ("default") changelist.
    #[serde(default, skip_serializing_if = "is_false")]
    pub active: bool,

    /// Whether the changelist is read-only.
    #[serde(default, rename = "readOnly", skip_serializing_if = "is_false")]
    pub read_only: bool,

    /// Free-form comment.
    #[serde(default)]
    pub comment: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Failure to resolve a project identifier to an open project.
///
/// The detail message is surfaced verbatim inside
/// [`TargetError::ProjectNotFound`](crate::protocol::TargetError::ProjectNotFound).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LocateError {
    message: String,
}

impl LocateError {
    /// Create a locate error with the given detail message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Resolves a project identifier to that project's changelist store.
///
/// Implementations must be `Send + Sync`; resolution may suspend (opening a
/// project can involve I/O) but must not be reentrant into the engine.
#[async_trait]
pub trait ProjectLocator: Send + Sync {
    /// Resolve `project` to its changelist store.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError`] when no open project matches the identifier;
    /// the error's message becomes the `detail` of the resulting
    /// `ProjectNotFound`.
    async fn open(&self, project: &str) -> Result<Arc<dyn ChangelistStore>, LocateError>;
}

/// A project's changelist collection.
///
/// The store owns persistence and its own serialization of concurrent
/// mutations. Iteration order of [`changelists`](ChangelistStore::changelists)
/// is store-defined and must be stable between calls with no intervening
/// writes; the engine never re-sorts it.
///
/// Activation is an authoritative set-operation: `set_active` makes the named
/// changelist the single active one, never a toggle.
pub trait ChangelistStore: Send + Sync + std::fmt::Debug {
    /// Whether the changelist feature is enabled for this project.
    fn changelists_enabled(&self) -> bool;

    /// All changelists, in store-defined order.
    fn changelists(&self) -> Vec<Changelist>;

    /// Look up a changelist by name.
    fn find(&self, name: &str) -> Option<Changelist>;

    /// Create a changelist. The caller has already checked `name` is free.
    fn add(&self, name: &str, comment: Option<&str>);

    /// Make `name` the single active changelist.
    fn set_active(&self, name: &str);

    /// Replace the comment of `name`.
    fn set_comment(&self, name: &str, comment: &str);

    /// Rename `name` to `new_name`. The caller has already checked
    /// `new_name` is free.
    fn rename(&self, name: &str, new_name: &str);

    /// Remove `name`. The caller has already checked it is not active.
    fn remove(&self, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_omits_false_flags() {
        let record = Changelist {
            name: "plain".to_string(),
            active: false,
            read_only: false,
            comment: Some(String::new()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"name": "plain", "comment": ""}));
    }

    #[test]
    fn record_serializes_null_comment() {
        let record = Changelist {
            name: "bare".to_string(),
            active: false,
            read_only: true,
            comment: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "bare", "readOnly": true, "comment": null})
        );
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = Changelist {
            name: "feature".to_string(),
            active: true,
            read_only: false,
            comment: Some("wip".to_string()),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: Changelist = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn locate_error_displays_its_message() {
        let err = LocateError::new("no project named 'x' is open");
        assert_eq!(err.to_string(), "no project named 'x' is open");
    }
}
