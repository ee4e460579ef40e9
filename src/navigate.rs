//! Login-redirect collaborator.
//!
//! A 401 means the session cookie is gone or stale; the user belongs on
//! the login page, with their current location preserved so they can
//! come back after re-authenticating. Navigation is owned by the hosting
//! application, so the client only holds this capability as an injected
//! dependency. Tests substitute a recording mock.

/// Navigation capability invoked on authentication failure.
pub trait Navigator: Send + Sync {
    /// Current location path. Used both as the post-login return target
    /// and to detect that the user is already in a login context (in
    /// which case no redirect fires).
    fn current_path(&self) -> String;

    /// Send the user to the login flow, preserving `return_path`.
    /// Fire-and-forget: the failed call still rejects normally.
    fn navigate_to_login(&self, return_path: &str);
}
