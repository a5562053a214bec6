//! store::memory
//!
//! In-memory changelist store for the bundled server and deterministic tests.
//!
//! # Design
//!
//! One [`MemoryChangelists`] holds a single project's changelists behind a
//! `Mutex`, preserving insertion order (the store-defined iteration order the
//! engine reports). [`MemoryLocator`] maps project identifiers to stores and
//! is the bundled [`ProjectLocator`].
//!
//! `set_active` is a set-operation: it clears every other record's flag, so
//! the store can never hold two active changelists.
//!
//! # Example
//!
//! ```
//! use changelist_gateway::protocol::ChangelistStore;
//! use changelist_gateway::store::memory::MemoryLocator;
//!
//! let locator = MemoryLocator::new();
//! let store = locator.create_project("acme", "Default");
//!
//! store.add("feature", Some("wip"));
//! store.set_active("feature");
//!
//! let names: Vec<String> = store
//!     .changelists()
//!     .into_iter()
//!     .map(|c| c.name)
//!     .collect();
//! assert_eq!(names, vec!["Default".to_string(), "feature".to_string()]);
//! assert!(store.find("feature").unwrap().active);
//! assert!(!store.find("Default").unwrap().active);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::protocol::{Changelist, ChangelistStore, LocateError, ProjectLocator};

/// A single project's changelists, held in memory.
#[derive(Debug)]
pub struct MemoryChangelists {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    enabled: bool,
    // Insertion order is the store's iteration order.
    lists: Vec<Changelist>,
}

impl MemoryChangelists {
    /// Create a store seeded with an active default changelist.
    pub fn new(default_changelist: &str) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                enabled: true,
                lists: vec![Changelist {
                    name: default_changelist.to_owned(),
                    active: true,
                    read_only: false,
                    comment: Some(String::new()),
                }],
            }),
        })
    }

    /// Flip the changelists-enabled flag (for exercising the precondition).
    pub fn set_enabled(&self, enabled: bool) {
        self.lock().enabled = enabled;
    }

    /// Mark a changelist read-only.
    pub fn set_read_only(&self, name: &str, read_only: bool) {
        let mut inner = self.lock();
        if let Some(list) = inner.lists.iter_mut().find(|c| c.name == name) {
            list.read_only = read_only;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-mutation in another test thread;
        // the data itself is a plain Vec and still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ChangelistStore for MemoryChangelists {
    fn changelists_enabled(&self) -> bool {
        self.lock().enabled
    }

    fn changelists(&self) -> Vec<Changelist> {
        self.lock().lists.clone()
    }

    fn find(&self, name: &str) -> Option<Changelist> {
        self.lock().lists.iter().find(|c| c.name == name).cloned()
    }

    fn add(&self, name: &str, comment: Option<&str>) {
        self.lock().lists.push(Changelist {
            name: name.to_owned(),
            active: false,
            read_only: false,
            comment: Some(comment.unwrap_or("").to_owned()),
        });
    }

    fn set_active(&self, name: &str) {
        let mut inner = self.lock();
        for list in inner.lists.iter_mut() {
            list.active = list.name == name;
        }
    }

    fn set_comment(&self, name: &str, comment: &str) {
        let mut inner = self.lock();
        if let Some(list) = inner.lists.iter_mut().find(|c| c.name == name) {
            list.comment = Some(comment.to_owned());
        }
    }

    fn rename(&self, name: &str, new_name: &str) {
        let mut inner = self.lock();
        if let Some(list) = inner.lists.iter_mut().find(|c| c.name == name) {
            list.name = new_name.to_owned();
        }
    }

    fn remove(&self, name: &str) {
        self.lock().lists.retain(|c| c.name != name);
    }
}

/// In-memory project locator.
#[derive(Debug, Default)]
pub struct MemoryLocator {
    projects: Mutex<HashMap<String, Arc<MemoryChangelists>>>,
}

impl MemoryLocator {
    /// Create an empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project and return its store, seeded with an active
    /// default changelist.
    pub fn create_project(
        &self,
        name: &str,
        default_changelist: &str,
    ) -> Arc<MemoryChangelists> {
        let store = MemoryChangelists::new(default_changelist);
        self.projects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_owned(), store.clone());
        store
    }

    /// Registered project names, for startup logging.
    pub fn project_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .projects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[async_trait]
impl ProjectLocator for MemoryLocator {
    async fn open(&self, project: &str) -> Result<Arc<dyn ChangelistStore>, LocateError> {
        let projects = self.projects.lock().unwrap_or_else(|e| e.into_inner());
        match projects.get(project) {
            Some(store) => Ok(store.clone() as Arc<dyn ChangelistStore>),
            None => Err(LocateError::new(format!(
                "no open project named '{project}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_starts_with_one_active_default() {
        let store = MemoryChangelists::new("Default");
        let lists = store.changelists();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "Default");
        assert!(lists[0].active);
        assert_eq!(lists[0].comment.as_deref(), Some(""));
    }

    #[test]
    fn set_active_is_exclusive() {
        let store = MemoryChangelists::new("Default");
        store.add("a", None);
        store.add("b", None);
        store.set_active("b");
        let active: Vec<_> = store
            .changelists()
            .into_iter()
            .filter(|c| c.active)
            .map(|c| c.name)
            .collect();
        assert_eq!(active, vec!["b".to_string()]);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let store = MemoryChangelists::new("Default");
        store.add("zeta", None);
        store.add("alpha", None);
        let names: Vec<_> = store.changelists().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Default", "zeta", "alpha"]);
    }

    #[test]
    fn rename_keeps_position_and_flags() {
        let store = MemoryChangelists::new("Default");
        store.add("old", Some("c"));
        store.rename("old", "new");
        let names: Vec<_> = store.changelists().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Default", "new"]);
        assert_eq!(store.find("new").unwrap().comment.as_deref(), Some("c"));
        assert!(store.find("old").is_none());
    }

    #[tokio::test]
    async fn locator_reports_unknown_projects() {
        let locator = MemoryLocator::new();
        locator.create_project("acme", "Default");
        assert!(locator.open("acme").await.is_ok());
        let err = locator.open("ghost").await.unwrap_err();
        assert_eq!(err.to_string(), "no open project named 'ghost'");
    }
}
