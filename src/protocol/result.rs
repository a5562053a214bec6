//! protocol::result
//!
//! Closed outcome model for changelist operations.
//!
//! # Design
//!
//! Every operation either succeeds or fails with one of a fixed set of
//! conditions. The error set is a closed `thiserror` enum so that every
//! consumption site matches exhaustively; adding a variant breaks the build
//! at each projection until it is handled.
//!
//! The rendering contract: every error variant displays a non-empty
//! human-readable message, and success renders to no message at all (the
//! URL-scheme transport returns `None` on success).

use thiserror::Error;

/// Outcome of a write operation.
///
/// Read operations return their payload on the `Ok` side instead of `()`.
pub type TargetResult = Result<(), TargetError>;

/// The closed set of conditions a changelist operation can fail with.
///
/// Equality is by variant identity plus payload, which dispatch tests use to
/// assert which branch fired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// The project identifier could not be resolved to an open project.
    ///
    /// Carries the identifier and the locator's own detail message.
    #[error("project '{project}' not found: {detail}")]
    ProjectNotFound {
        /// Project identifier as given by the caller.
        project: String,
        /// Detail from the project locator.
        detail: String,
    },

    /// The changelist feature is not enabled for the resolved project.
    #[error("changelists are not enabled in this project")]
    ChangelistsNotEnabled,

    /// No changelist with the given name exists in the project.
    #[error("changelist '{0}' not found")]
    ChangelistNotFound(String),

    /// A required parameter was absent (or empty where a name is required).
    #[error("parameter '{0}' is required")]
    MissingParameter(&'static str),

    /// A changelist with the requested name already exists.
    #[error("a changelist with that name already exists")]
    DuplicateChangelist,

    /// The currently active changelist cannot be deactivated.
    #[error("the active changelist cannot be deactivated")]
    DeactivateNotPermitted,

    /// The currently active changelist cannot be deleted.
    #[error("the active changelist cannot be deleted")]
    DeleteNotPermitted,
}
