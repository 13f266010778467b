//! Access gate: the allow/redirect decision made before a protected view mounts.

use crate::{Role, Route, Session, SessionStore};

/// Outcome of gating a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// The wrapped view may mount.
    Allow,
    /// The caller must navigate to the given route instead.
    Redirect(Route),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Decide whether `session` may enter a route restricted to `allowed_roles`.
///
/// An empty `allowed_roles` means "any authenticated role".
///
/// - No IO
/// - No panics
/// - Same inputs, same answer
pub fn decide(session: &Session, allowed_roles: &[Role]) -> Access {
    if !session.is_authenticated() {
        return Access::Redirect(Route::Login);
    }

    if allowed_roles.is_empty() {
        return Access::Allow;
    }

    match session.role() {
        Some(role) if allowed_roles.contains(&role) => Access::Allow,
        _ => Access::Redirect(Route::Login),
    }
}

/// Gate a navigation to `route`, reading the session fresh from `store`.
///
/// Never cached: role or token may have changed since the last navigation.
pub fn guard(store: &dyn SessionStore, route: Route) -> Access {
    let Some(allowed) = route.allowed_roles() else {
        return Access::Allow;
    };

    let access = decide(&store.read(), allowed);
    if !access.is_allowed() {
        tracing::debug!(route = route.path(), "access denied; redirecting to login");
    }
    access
}
