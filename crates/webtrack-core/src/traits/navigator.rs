//! Navigation signal trait.

/// Where the caller is sent once a session is terminated.
pub const LOGIN_PATH: &str = "/login";

/// Receives navigation requests from the gateway.
///
/// The gateway never renders anything itself; on a forced logout it asks the
/// embedding application to move to [`LOGIN_PATH`].
pub trait Navigator: Send + Sync {
    /// Navigate to the given application path.
    fn navigate(&self, path: &str);
}

/// A navigator that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        tracing::trace!(path, "navigation ignored");
    }
}
