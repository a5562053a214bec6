//! callback::mock
//!
//! Recording callback invoker for deterministic testing.
//!
//! # Example
//!
//! ```
//! use changelist_gateway::callback::{CallbackInvoker, RecordingCallbackInvoker};
//!
//! let invoker = RecordingCallbackInvoker::new();
//! invoker.invoke(Some("caller-app"), "caller-app://done");
//!
//! let invocations = invoker.invocations();
//! assert_eq!(invocations.len(), 1);
//! assert_eq!(invocations[0].source.as_deref(), Some("caller-app"));
//! assert_eq!(invocations[0].callback, "caller-app://done");
//! ```

use std::sync::Mutex;

use super::CallbackInvoker;

/// One recorded callback invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The caller's `x-source` tag, if any.
    pub source: Option<String>,
    /// The fired callback URL.
    pub callback: String,
}

/// Callback invoker that records invocations instead of launching anything.
#[derive(Debug, Default)]
pub struct RecordingCallbackInvoker {
    invocations: Mutex<Vec<Invocation>>,
}

impl RecordingCallbackInvoker {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything invoked so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock().clone()
    }

    /// The most recent invocation, if any.
    pub fn last(&self) -> Option<Invocation> {
        self.lock().last().cloned()
    }

    /// Forget all recorded invocations.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Invocation>> {
        self.invocations.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CallbackInvoker for RecordingCallbackInvoker {
    fn invoke(&self, source: Option<&str>, callback: &str) {
        self.lock().push(Invocation {
            source: source.map(str::to_owned),
            callback: callback.to_owned(),
        });
    }
}
