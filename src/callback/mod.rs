//! callback
//!
//! Callback invocation for the URL-scheme transport.
//!
//! # Design
//!
//! After a URL-scheme command finishes, the caller may be notified through a
//! callback URL (`x-success` / `x-error`). Firing that URL is a side effect
//! decoupled from the command's own result: it happens after the result is
//! known, exactly once, and its latency or failure never changes the result
//! or blocks the caller.
//!
//! [`CallbackInvoker`] is the seam; [`system::SystemCallbackInvoker`] opens
//! the URL with the OS handler, [`mock::RecordingCallbackInvoker`] records
//! invocations for tests.

pub mod mock;
pub mod system;

pub use mock::RecordingCallbackInvoker;
pub use system::SystemCallbackInvoker;

/// Fire-and-forget callback notification.
///
/// Implementations must be `Send + Sync`. `invoke` must not block the caller
/// beyond dispatching the work and must swallow its own failures (logging
/// them is fine; propagating them is not).
pub trait CallbackInvoker: Send + Sync {
    /// Trigger `callback` on behalf of `source`.
    ///
    /// `source` is the caller's `x-source` tag, carried for logging only.
    fn invoke(&self, source: Option<&str>, callback: &str);
}
