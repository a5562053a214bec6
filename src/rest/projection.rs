//! rest::projection
//!
//! Maps operation outcomes onto HTTP status codes and bodies.
//!
//! This is the only place the REST transport interprets a [`TargetError`];
//! handlers stay mechanical. Error responses carry the rendered message as a
//! plain-text body.

use axum::http::StatusCode;

use crate::protocol::TargetError;

/// The HTTP status an error projects to.
///
/// Resolution failures are 404, a disabled changelist feature is 403, and
/// every validation failure is 400.
pub fn status_for(error: &TargetError) -> StatusCode {
    match error {
        TargetError::ProjectNotFound { .. } | TargetError::ChangelistNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        TargetError::ChangelistsNotEnabled => StatusCode::FORBIDDEN,
        TargetError::MissingParameter(_)
        | TargetError::DuplicateChangelist
        | TargetError::DeactivateNotPermitted
        | TargetError::DeleteNotPermitted => StatusCode::BAD_REQUEST,
    }
}

/// Project an error to its full HTTP representation.
pub fn error_response(error: &TargetError) -> (StatusCode, String) {
    (status_for(error), error.to_string())
}
