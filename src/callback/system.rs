//! callback::system
//!
//! Callback invoker that opens the URL with the OS handler.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::CallbackInvoker;

/// Opens callback URLs via the platform's URL handler (`open`, `xdg-open`,
/// `start`, as the `open` crate resolves them).
///
/// The launch runs on a background blocking task, bounded by `timeout`; the
/// invoking request never waits on it. Must be used inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct SystemCallbackInvoker {
    timeout: Duration,
}

impl SystemCallbackInvoker {
    /// Create an invoker that waits at most `timeout` for the URL handler.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CallbackInvoker for SystemCallbackInvoker {
    fn invoke(&self, source: Option<&str>, callback: &str) {
        let source = source.map(str::to_owned);
        let callback = callback.to_owned();
        let timeout = self.timeout;
        tokio::spawn(async move {
            debug!(?source, %callback, "launching callback url");
            let launch = tokio::task::spawn_blocking({
                let callback = callback.clone();
                move || open::that(&callback)
            });
            match tokio::time::timeout(timeout, launch).await {
                Ok(Ok(Ok(()))) => info!(%callback, "callback launched"),
                Ok(Ok(Err(err))) => error!(%callback, %err, "callback launch failed"),
                Ok(Err(join_err)) => error!(%callback, %join_err, "callback task panicked"),
                // The blocking task keeps running; we just stop waiting on it.
                Err(_) => warn!(%callback, ?timeout, "callback launch timed out"),
            }
        });
    }
}
