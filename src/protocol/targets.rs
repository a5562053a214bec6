//! protocol::targets
//!
//! Target dispatch and operation logic.
//!
//! # Design
//!
//! The operation set is fixed: List, Get, Add, Edit, Rename, Remove. Each is
//! a method on [`Dispatcher`]; the four write operations are additionally
//! reachable through one uniform entry, [`Dispatcher::execute`], keyed on the
//! closed [`WriteRequest`] enum. The set is exhaustively enumerable, so there
//! is no open-ended virtual dispatch.
//!
//! Two cross-cutting preconditions run, in order, before any operation:
//!
//! 1. The project identifier must resolve via the [`ProjectLocator`]
//! 2. The resolved project must have changelists enabled
//!
//! # Invariants
//!
//! - Activation is authoritative: operations call `set_active`, never toggle
//! - The active changelist is never deactivated or removed
//! - Failed operations mutate nothing, except rename's documented
//!   edit-before-collision-check ordering

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::request::{
    AddRequest, EditPayload, EditRequest, GetRequest, ListRequest, RemoveRequest, RenameRequest,
};
use super::result::{TargetError, TargetResult};
use super::store::{Changelist, ChangelistStore, ProjectLocator};

/// Output of the List operation: all records, in store-defined order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelistList {
    /// The project's changelists.
    pub changelists: Vec<Changelist>,
}

/// Uniform entry for the four write operations.
///
/// Transports map their verb (URL-scheme target string, HTTP method + path
/// shape) onto one of these before calling [`Dispatcher::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequest {
    /// Create a changelist.
    Add(AddRequest),
    /// Edit comment/activation.
    Edit(EditRequest),
    /// Rename, with optional edits applied first.
    Rename(RenameRequest),
    /// Remove a changelist.
    Remove(RemoveRequest),
}

impl WriteRequest {
    /// The project the request targets.
    pub fn project(&self) -> &str {
        match self {
            WriteRequest::Add(r) => &r.project,
            WriteRequest::Edit(r) => &r.project,
            WriteRequest::Rename(r) => &r.project,
            WriteRequest::Remove(r) => &r.project,
        }
    }
}

/// Routes requests to operations against the changelist store.
///
/// Holds only the project locator; all per-request state lives on the stack.
/// Cloning is cheap (one `Arc`).
#[derive(Clone)]
pub struct Dispatcher {
    locator: Arc<dyn ProjectLocator>,
}

impl Dispatcher {
    /// Create a dispatcher over the given project locator.
    pub fn new(locator: Arc<dyn ProjectLocator>) -> Self {
        Self { locator }
    }

    /// Resolve the project and check the changelist feature is enabled.
    ///
    /// Both preconditions run before any operation; neither mutates.
    async fn open_project(&self, project: &str) -> Result<Arc<dyn ChangelistStore>, TargetError> {
        let store =
            self.locator
                .open(project)
                .await
                .map_err(|err| TargetError::ProjectNotFound {
                    project: project.to_owned(),
                    detail: err.to_string(),
                })?;
        if !store.changelists_enabled() {
            return Err(TargetError::ChangelistsNotEnabled);
        }
        Ok(store)
    }

    /// List all changelists of a project, in store-defined order.
    pub async fn list(&self, request: &ListRequest) -> Result<ChangelistList, TargetError> {
        debug!(project = %request.project, "dispatching list");
        let store = self.open_project(&request.project).await?;
        Ok(ChangelistList {
            changelists: store.changelists(),
        })
    }

    /// Fetch a single changelist by name.
    pub async fn get(&self, request: &GetRequest) -> Result<Changelist, TargetError> {
        debug!(project = %request.project, name = ?request.name, "dispatching get");
        let store = self.open_project(&request.project).await?;
        let name = require("name", request.name.as_deref())?;
        resolve_changelist(store.as_ref(), &name)
    }

    /// Run one of the four write operations.
    pub async fn execute(&self, request: &WriteRequest) -> TargetResult {
        match request {
            WriteRequest::Add(r) => self.add(r).await,
            WriteRequest::Edit(r) => self.edit(r).await,
            WriteRequest::Rename(r) => self.rename(r).await,
            WriteRequest::Remove(r) => self.remove(r).await,
        }
    }

    /// Create a changelist and, unless `active` is explicitly false, make it
    /// the active one.
    pub async fn add(&self, request: &AddRequest) -> TargetResult {
        debug!(project = %request.project, name = ?request.payload.name, "dispatching add");
        let store = self.open_project(&request.project).await?;
        let name = require("name", request.payload.name.as_deref())?;
        if store.find(&name).is_some() {
            return Err(TargetError::DuplicateChangelist);
        }
        store.add(&name, Some(request.payload.comment.as_deref().unwrap_or("")));
        if request.payload.active != Some(false) {
            store.set_active(&name);
        }
        Ok(())
    }

    /// Edit a changelist's comment and/or activation.
    pub async fn edit(&self, request: &EditRequest) -> TargetResult {
        debug!(project = %request.project, name = ?request.name, "dispatching edit");
        let store = self.open_project(&request.project).await?;
        let name = require("name", request.name.as_deref())?;
        let target = resolve_changelist(store.as_ref(), &name)?;
        apply_update(store.as_ref(), &target, &request.payload)
    }

    /// Rename a changelist.
    ///
    /// Comment/activation edits apply first; the collision check on the new
    /// name runs after them, so a rename rejected with `DuplicateChangelist`
    /// leaves those edits in place. Preserved for compatibility with the
    /// observed protocol behavior.
    pub async fn rename(&self, request: &RenameRequest) -> TargetResult {
        debug!(
            project = %request.project,
            name = ?request.name,
            new_name = ?request.payload.new_name,
            "dispatching rename"
        );
        let store = self.open_project(&request.project).await?;
        let new_name = require("new-name", request.payload.new_name.as_deref())?;
        let name = require("name", request.name.as_deref())?;
        let target = resolve_changelist(store.as_ref(), &name)?;
        apply_update(store.as_ref(), &target, &request.payload.edits())?;
        if store.find(&new_name).is_some() {
            return Err(TargetError::DuplicateChangelist);
        }
        store.rename(&name, &new_name);
        Ok(())
    }

    /// Remove a changelist. The active changelist is protected.
    pub async fn remove(&self, request: &RemoveRequest) -> TargetResult {
        debug!(project = %request.project, name = ?request.name, "dispatching remove");
        let store = self.open_project(&request.project).await?;
        let name = require("name", request.name.as_deref())?;
        let target = resolve_changelist(store.as_ref(), &name)?;
        if target.active {
            return Err(TargetError::DeleteNotPermitted);
        }
        store.remove(&name);
        Ok(())
    }
}

/// Extract a required, non-empty parameter.
fn require(param: &'static str, value: Option<&str>) -> Result<String, TargetError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(TargetError::MissingParameter(param)),
    }
}

/// Look up a changelist that the operation requires to exist.
fn resolve_changelist(
    store: &dyn ChangelistStore,
    name: &str,
) -> Result<Changelist, TargetError> {
    store
        .find(name)
        .ok_or_else(|| TargetError::ChangelistNotFound(name.to_owned()))
}

/// Shared comment/activation logic of Edit and Rename.
///
/// Deactivating the active changelist is refused before any mutation. An
/// `active` value other than explicit false activates the target (an
/// authoritative set-operation, which is what keeps the exactly-one-active
/// invariant once it holds).
fn apply_update(
    store: &dyn ChangelistStore,
    target: &Changelist,
    edits: &EditPayload,
) -> TargetResult {
    if edits.active == Some(false) && target.active {
        return Err(TargetError::DeactivateNotPermitted);
    }
    if edits.active != Some(false) {
        store.set_active(&target.name);
    }
    if let Some(comment) = &edits.comment {
        store.set_comment(&target.name, comment);
    }
    Ok(())
}
