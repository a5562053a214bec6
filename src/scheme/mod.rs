//! scheme
//!
//! URL-scheme transport: `changelist/<verb>?project=<p>&...`.
//!
//! # Verbs
//!
//! | verb | required | optional |
//! |---|---|---|
//! | `add` | project, name | comment, active |
//! | `activate` | project | name, default |
//! | `update` | project, name | new-name, comment, active |
//! | `remove` | project, name | — |
//!
//! `update` routes to rename when `new-name` is present, to edit otherwise.
//! `activate` binds to an edit with an activation-only payload; `default=true`
//! substitutes the configured canonical default-changelist name when no name
//! is given.
//!
//! # Callbacks
//!
//! Any verb may carry `x-source`, `x-success`, and `x-error`. After the
//! result is known, `x-success` fires on success and `x-error` on any
//! failure, including a missing or unknown verb. Only the URL is invoked; no
//! payload is appended.
//!
//! # Return contract
//!
//! `None` on success, otherwise the rendered error message.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::callback::CallbackInvoker;
use crate::protocol::{
    AddRequest, Dispatcher, EditPayload, EditRequest, FlatParams, ProjectLocator, RemoveRequest,
    RenameRequest, TargetError, WriteRequest,
};

/// Command namespace the transport answers to.
pub const COMMAND: &str = "changelist";

/// Reserved callback parameter keys.
pub mod callback_keys {
    /// Tag identifying the calling application.
    pub const X_SOURCE: &str = "x-source";
    /// URL to fire on success.
    pub const X_SUCCESS: &str = "x-success";
    /// URL to fire on any failure.
    pub const X_ERROR: &str = "x-error";
}

/// Failures to even recognize a command string as ours.
///
/// These are transport errors, distinct from [`TargetError`]: the command
/// never reaches the dispatcher and no callback fires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    /// The command path does not start with the `changelist` namespace.
    #[error("not a changelist command: '{0}'")]
    WrongNamespace(String),

    /// The command was given as a full URL that does not parse.
    #[error("malformed command url '{url}': {detail}")]
    MalformedUrl {
        /// The offending input.
        url: String,
        /// Parser detail.
        detail: String,
    },
}

/// The URL-scheme transport: binds flat parameters, dispatches, selects the
/// callback, and projects the result to an optional message string.
pub struct SchemeGateway {
    dispatcher: Dispatcher,
    invoker: Arc<dyn CallbackInvoker>,
    default_changelist: String,
}

impl SchemeGateway {
    /// Create a gateway over the given collaborators.
    ///
    /// `default_changelist` is the canonical default-changelist name
    /// substituted by `activate` with `default=true`; it is injected
    /// configuration, never hardcoded here.
    pub fn new(
        locator: Arc<dyn ProjectLocator>,
        invoker: Arc<dyn CallbackInvoker>,
        default_changelist: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(locator),
            invoker,
            default_changelist: default_changelist.into(),
        }
    }

    /// Parse and handle a full command string.
    ///
    /// Accepts either the bare form `changelist/<verb>?k=v&...` or a full URL
    /// whose path contains the `changelist` namespace (e.g.
    /// `someide://open/changelist/add?project=acme&name=x`). Query values are
    /// percent-decoded.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError`] when the input is not a changelist command at
    /// all; such inputs never fire callbacks.
    pub async fn handle_command(&self, command: &str) -> Result<Option<String>, SchemeError> {
        let (verb, params) = parse_command(command)?;
        Ok(self.handle(verb.as_deref(), &params).await)
    }

    /// Handle an already-split command: optional verb plus flat parameters.
    ///
    /// Returns `None` on success, otherwise the rendered error message. The
    /// matching callback (`x-success`/`x-error`) fires exactly once either
    /// way, when present.
    pub async fn handle(
        &self,
        verb: Option<&str>,
        params: &HashMap<String, String>,
    ) -> Option<String> {
        let flat = FlatParams::new(params);
        let request = match verb {
            None => return self.reject(params, "a changelist verb is required".to_string()),
            Some("add") => self.bind_add(flat),
            Some("activate") => self.bind_activate(flat),
            Some("update") => self.bind_update(flat),
            Some("remove") => self.bind_remove(flat),
            Some(other) => {
                return self.reject(params, format!("unknown changelist verb '{other}'"))
            }
        };

        let result = match request {
            Ok(request) => self.dispatcher.execute(&request).await,
            Err(err) => Err(err),
        };

        self.dispatch_callback(result.is_ok(), params);
        result.err().map(|err| err.to_string())
    }

    fn bind_add(&self, flat: FlatParams<'_>) -> Result<WriteRequest, TargetError> {
        Ok(WriteRequest::Add(AddRequest {
            project: require_project(flat)?,
            payload: flat.add_payload(),
        }))
    }

    fn bind_activate(&self, flat: FlatParams<'_>) -> Result<WriteRequest, TargetError> {
        // default=true substitutes the canonical default-changelist name
        // before any further processing.
        let name = if flat.default_flag() == Some(true) {
            Some(self.default_changelist.clone())
        } else {
            flat.name().map(str::to_owned)
        };
        Ok(WriteRequest::Edit(EditRequest {
            project: require_project(flat)?,
            name,
            payload: EditPayload::activate(),
        }))
    }

    fn bind_update(&self, flat: FlatParams<'_>) -> Result<WriteRequest, TargetError> {
        let project = require_project(flat)?;
        let name = flat.name().map(str::to_owned);
        if flat.has_new_name() {
            Ok(WriteRequest::Rename(RenameRequest {
                project,
                name,
                payload: flat.rename_payload(),
            }))
        } else {
            Ok(WriteRequest::Edit(EditRequest {
                project,
                name,
                payload: flat.edit_payload(),
            }))
        }
    }

    fn bind_remove(&self, flat: FlatParams<'_>) -> Result<WriteRequest, TargetError> {
        Ok(WriteRequest::Remove(RemoveRequest {
            project: require_project(flat)?,
            name: flat.name().map(str::to_owned),
        }))
    }

    /// Reject before dispatch: fire `x-error` (if present) and return the
    /// message.
    fn reject(&self, params: &HashMap<String, String>, message: String) -> Option<String> {
        debug!(%message, "rejecting command before dispatch");
        if let Some(callback) = params.get(callback_keys::X_ERROR) {
            let source = params.get(callback_keys::X_SOURCE).map(String::as_str);
            info!(?source, "handling callback for invalid call");
            self.invoker.invoke(source, callback);
        }
        Some(message)
    }

    /// Select and fire the callback matching the outcome.
    fn dispatch_callback(&self, success: bool, params: &HashMap<String, String>) {
        let key = if success {
            callback_keys::X_SUCCESS
        } else {
            callback_keys::X_ERROR
        };
        match params.get(key) {
            Some(callback) => {
                let source = params.get(callback_keys::X_SOURCE).map(String::as_str);
                info!(?source, %success, "handling callback");
                self.invoker.invoke(source, callback);
            }
            None => debug!("no callback url"),
        }
    }
}

fn require_project(flat: FlatParams<'_>) -> Result<String, TargetError> {
    match flat.project() {
        Some(project) if !project.is_empty() => Ok(project.to_owned()),
        _ => Err(TargetError::MissingParameter("project")),
    }
}

/// Split a command string into its verb and flat parameter map.
fn parse_command(command: &str) -> Result<(Option<String>, HashMap<String, String>), SchemeError> {
    if command.contains("://") {
        let url = Url::parse(command).map_err(|err| SchemeError::MalformedUrl {
            url: command.to_owned(),
            detail: err.to_string(),
        })?;
        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        let namespace = segments
            .iter()
            .position(|s| s == COMMAND)
            .ok_or_else(|| SchemeError::WrongNamespace(command.to_owned()))?;
        let verb = segments.get(namespace + 1).cloned();
        let params = url.query_pairs().into_owned().collect();
        Ok((verb, params))
    } else {
        let (path, query) = match command.split_once('?') {
            Some((path, query)) => (path, query),
            None => (command, ""),
        };
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        if segments.next() != Some(COMMAND) {
            return Err(SchemeError::WrongNamespace(command.to_owned()));
        }
        let verb = segments.next().map(str::to_owned);
        let params = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Ok((verb, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::RecordingCallbackInvoker;
    use crate::store::memory::MemoryLocator;

    fn gateway() -> (SchemeGateway, Arc<RecordingCallbackInvoker>) {
        let locator = Arc::new(MemoryLocator::new());
        locator.create_project("acme", "Default");
        let invoker = Arc::new(RecordingCallbackInvoker::new());
        (
            SchemeGateway::new(locator, invoker.clone(), "Default"),
            invoker,
        )
    }

    #[test]
    fn parses_bare_commands_with_decoding() {
        let (verb, params) =
            parse_command("changelist/add?project=acme&name=feature&comment=hello%20world")
                .unwrap();
        assert_eq!(verb.as_deref(), Some("add"));
        assert_eq!(params["project"], "acme");
        assert_eq!(params["comment"], "hello world");
    }

    #[test]
    fn parses_full_urls() {
        let (verb, params) =
            parse_command("someide://open/changelist/remove?project=acme&name=feature").unwrap();
        assert_eq!(verb.as_deref(), Some("remove"));
        assert_eq!(params["name"], "feature");
    }

    #[test]
    fn missing_verb_parses_to_none() {
        let (verb, params) = parse_command("changelist?project=acme").unwrap();
        assert_eq!(verb, None);
        assert_eq!(params["project"], "acme");
    }

    #[test]
    fn foreign_namespace_is_rejected() {
        assert!(matches!(
            parse_command("bookmark/add?project=acme"),
            Err(SchemeError::WrongNamespace(_))
        ));
    }

    #[tokio::test]
    async fn success_returns_no_message() {
        let (gateway, _invoker) = gateway();
        let message = gateway
            .handle_command("changelist/add?project=acme&name=feature")
            .await
            .unwrap();
        assert_eq!(message, None);
    }

    #[tokio::test]
    async fn unknown_verb_fires_the_error_callback() {
        let (gateway, invoker) = gateway();
        let message = gateway
            .handle_command("changelist/bogus?project=acme&x-error=app://err&x-source=app")
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("unknown changelist verb 'bogus'"));
        let invocation = invoker.last().unwrap();
        assert_eq!(invocation.callback, "app://err");
        assert_eq!(invocation.source.as_deref(), Some("app"));
    }

    #[tokio::test]
    async fn missing_verb_fires_the_error_callback() {
        let (gateway, invoker) = gateway();
        let message = gateway
            .handle_command("changelist?x-error=app://err")
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("a changelist verb is required"));
        assert_eq!(invoker.last().unwrap().callback, "app://err");
    }

    #[tokio::test]
    async fn missing_project_is_a_missing_parameter() {
        let (gateway, _invoker) = gateway();
        let message = gateway
            .handle_command("changelist/add?name=feature")
            .await
            .unwrap();
        assert_eq!(
            message,
            Some(TargetError::MissingParameter("project").to_string())
        );
    }

    #[tokio::test]
    async fn activate_substitutes_the_default_name() {
        let (gateway, _invoker) = gateway();
        // Park a non-default changelist as active first.
        gateway
            .handle_command("changelist/add?project=acme&name=feature")
            .await
            .unwrap();
        let message = gateway
            .handle_command("changelist/activate?project=acme&default=true")
            .await
            .unwrap();
        assert_eq!(message, None);
    }

    #[tokio::test]
    async fn update_with_new_name_routes_to_rename() {
        let (gateway, _invoker) = gateway();
        gateway
            .handle_command("changelist/add?project=acme&name=feature")
            .await
            .unwrap();
        let message = gateway
            .handle_command("changelist/update?project=acme&name=feature&new-name=Default")
            .await
            .unwrap();
        assert_eq!(
            message,
            Some(TargetError::DuplicateChangelist.to_string())
        );
    }
}
