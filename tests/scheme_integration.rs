//! Integration tests for the URL-scheme transport.
//!
//! These exercise the full command path: string parsing, flat binding, verb
//! routing, dispatch, callback selection, and message projection.

use std::sync::Arc;

use changelist_gateway::callback::RecordingCallbackInvoker;
use changelist_gateway::protocol::ChangelistStore;
use changelist_gateway::scheme::{SchemeError, SchemeGateway};
use changelist_gateway::store::memory::{MemoryChangelists, MemoryLocator};

struct TestGateway {
    gateway: SchemeGateway,
    invoker: Arc<RecordingCallbackInvoker>,
    store: Arc<MemoryChangelists>,
}

impl TestGateway {
    fn new() -> Self {
        let locator = Arc::new(MemoryLocator::new());
        let store = locator.create_project("acme", "Default");
        let invoker = Arc::new(RecordingCallbackInvoker::new());
        Self {
            gateway: SchemeGateway::new(locator, invoker.clone(), "Default"),
            invoker,
            store,
        }
    }

    async fn handle(&self, command: &str) -> Option<String> {
        self.gateway
            .handle_command(command)
            .await
            .expect("command should parse")
    }
}

#[tokio::test]
async fn add_creates_and_activates() {
    let gw = TestGateway::new();
    let message = gw
        .handle("changelist/add?project=acme&name=feature&comment=hello%20world")
        .await;
    assert_eq!(message, None);

    let feature = gw.store.find("feature").unwrap();
    assert!(feature.active);
    assert_eq!(feature.comment.as_deref(), Some("hello world"));
}

#[tokio::test]
async fn add_with_active_false_leaves_the_default_alone() {
    let gw = TestGateway::new();
    let message = gw
        .handle("changelist/add?project=acme&name=feature&active=false")
        .await;
    assert_eq!(message, None);
    assert!(gw.store.find("Default").unwrap().active);
    assert!(!gw.store.find("feature").unwrap().active);
}

#[tokio::test]
async fn activate_by_name() {
    let gw = TestGateway::new();
    gw.store.add("feature", None);

    let message = gw.handle("changelist/activate?project=acme&name=feature").await;
    assert_eq!(message, None);
    assert!(gw.store.find("feature").unwrap().active);
}

#[tokio::test]
async fn activate_with_default_true_targets_the_canonical_default() {
    let gw = TestGateway::new();
    gw.store.add("feature", None);
    gw.store.set_active("feature");

    let message = gw.handle("changelist/activate?project=acme&default=true").await;
    assert_eq!(message, None);
    assert!(gw.store.find("Default").unwrap().active);
    assert!(!gw.store.find("feature").unwrap().active);
}

#[tokio::test]
async fn activate_without_name_or_default_is_missing_name() {
    let gw = TestGateway::new();
    let message = gw.handle("changelist/activate?project=acme").await;
    assert_eq!(message.as_deref(), Some("parameter 'name' is required"));
}

#[tokio::test]
async fn update_edits_comment() {
    let gw = TestGateway::new();
    gw.store.add("feature", None);

    let message = gw
        .handle("changelist/update?project=acme&name=feature&comment=Updated%20comment")
        .await;
    assert_eq!(message, None);
    assert_eq!(
        gw.store.find("feature").unwrap().comment.as_deref(),
        Some("Updated comment")
    );
}

#[tokio::test]
async fn update_with_new_name_renames() {
    let gw = TestGateway::new();
    gw.store.add("feature", None);

    let message = gw
        .handle("changelist/update?project=acme&name=feature&new-name=release")
        .await;
    assert_eq!(message, None);
    assert!(gw.store.find("feature").is_none());
    assert!(gw.store.find("release").is_some());
}

#[tokio::test]
async fn remove_deletes_a_parked_changelist() {
    let gw = TestGateway::new();
    gw.store.add("feature", None);

    let message = gw.handle("changelist/remove?project=acme&name=feature").await;
    assert_eq!(message, None);
    assert!(gw.store.find("feature").is_none());
}

#[tokio::test]
async fn errors_render_their_message() {
    let gw = TestGateway::new();
    let message = gw
        .handle("changelist/remove?project=acme&name=missing")
        .await;
    assert_eq!(message.as_deref(), Some("changelist 'missing' not found"));
}

// =============================================================================
// Callbacks
// =============================================================================

#[tokio::test]
async fn success_fires_x_success() {
    let gw = TestGateway::new();
    let message = gw
        .handle(
            "changelist/add?project=acme&name=feature\
             &x-success=app%3A%2F%2Fonsuccess&x-error=app%3A%2F%2Fonerror",
        )
        .await;
    assert_eq!(message, None);

    let invocation = gw.invoker.last().unwrap();
    assert_eq!(invocation.callback, "app://onsuccess");
    assert_eq!(invocation.source, None);
    assert_eq!(gw.invoker.invocations().len(), 1);
}

#[tokio::test]
async fn failure_fires_x_error_with_the_source_tag() {
    let gw = TestGateway::new();
    gw.store.add("feature", None);

    let message = gw
        .handle(
            "changelist/add?project=acme&name=feature&x-source=caller\
             &x-success=app%3A%2F%2Fonsuccess&x-error=app%3A%2F%2Fonerror",
        )
        .await;
    assert!(message.is_some());

    let invocation = gw.invoker.last().unwrap();
    assert_eq!(invocation.callback, "app://onerror");
    assert_eq!(invocation.source.as_deref(), Some("caller"));
}

#[tokio::test]
async fn no_callback_params_means_no_invocation() {
    let gw = TestGateway::new();
    gw.handle("changelist/add?project=acme&name=feature").await;
    assert!(gw.invoker.invocations().is_empty());
}

#[tokio::test]
async fn unknown_project_fires_x_error() {
    let gw = TestGateway::new();
    let message = gw
        .handle("changelist/add?project=ghost&name=feature&x-error=app%3A%2F%2Ferr")
        .await;
    assert!(message.unwrap().starts_with("project 'ghost' not found"));
    assert_eq!(gw.invoker.last().unwrap().callback, "app://err");
}

#[tokio::test]
async fn unknown_verb_fires_x_error_and_reports() {
    let gw = TestGateway::new();
    let message = gw
        .handle("changelist/archive?project=acme&x-error=app%3A%2F%2Ferr")
        .await;
    assert_eq!(message.as_deref(), Some("unknown changelist verb 'archive'"));
    assert_eq!(gw.invoker.last().unwrap().callback, "app://err");
}

#[tokio::test]
async fn foreign_commands_never_fire_callbacks() {
    let gw = TestGateway::new();
    let err = gw
        .gateway
        .handle_command("bookmark/add?x-error=app%3A%2F%2Ferr")
        .await
        .unwrap_err();
    assert!(matches!(err, SchemeError::WrongNamespace(_)));
    assert!(gw.invoker.invocations().is_empty());
}
