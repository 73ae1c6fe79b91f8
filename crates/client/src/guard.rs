//! Route guarding from session state.

use crate::session::AuthStatus;

/// What the router should do with a guarded route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session status is not settled yet; render nothing and wait.
    Wait,
    /// The visitor is authenticated; render the route.
    Allow,
    /// The visitor is not authenticated; send them to the login page.
    RedirectToLogin,
}

/// Decide from the two session signals.
///
/// `is_loading` wins over `is_authenticated`: redirecting before the first
/// auth check completes would bounce authenticated users to the login page.
#[must_use]
pub const fn decide(is_authenticated: bool, is_loading: bool) -> GuardDecision {
    if is_loading {
        GuardDecision::Wait
    } else if is_authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin
    }
}

impl From<AuthStatus> for GuardDecision {
    fn from(status: AuthStatus) -> Self {
        match status {
            AuthStatus::Unknown | AuthStatus::Checking => Self::Wait,
            AuthStatus::Authenticated => Self::Allow,
            AuthStatus::Unauthenticated => Self::RedirectToLogin,
        }
    }
}
