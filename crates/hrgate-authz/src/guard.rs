//! Navigation guards.
//!
//! # Purpose
//! Turn evaluator and route-matcher answers into navigation decisions the
//! hosting router can act on.
//!
//! # How it fits
//! The host calls a guard before committing a navigation. Guards never
//! redirect themselves; they return a [`NavigationDecision`] and the host
//! performs the redirect.
//!
//! # Key invariants
//! - No active session always yields [`NavigationDecision::RedirectToLogin`].
//! - Every call re-evaluates; nothing is cached between navigations.
use crate::{AccessEvaluator, RequiredPermission, RouteMatcher, SessionProvider};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_DENIED_REDIRECT: &str = "/dashboard";
pub const ACCESS_DENIED_MESSAGE: &str = "You do not have permission to access this page";

/// Where guards send users they turn away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectPaths {
    pub login_path: String,
    pub denied_redirect: String,
}

impl Default for RedirectPaths {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            denied_redirect: DEFAULT_DENIED_REDIRECT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationDecision {
    Allow,
    RedirectToLogin {
        login_path: String,
        return_url: String,
    },
    Deny {
        redirect_to: String,
        message: String,
    },
}

impl NavigationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }

    fn login(redirects: &RedirectPaths, path: &str) -> Self {
        NavigationDecision::RedirectToLogin {
            login_path: redirects.login_path.clone(),
            return_url: path.to_string(),
        }
    }

    fn denied(redirects: &RedirectPaths) -> Self {
        NavigationDecision::Deny {
            redirect_to: redirects.denied_redirect.clone(),
            message: ACCESS_DENIED_MESSAGE.to_string(),
        }
    }

    fn from_check(allowed: bool, redirects: &RedirectPaths) -> Self {
        if allowed {
            NavigationDecision::Allow
        } else {
            NavigationDecision::denied(redirects)
        }
    }
}

/// Only requires an active session.
pub fn authenticated_guard(
    path: &str,
    session: &impl SessionProvider,
    redirects: &RedirectPaths,
) -> NavigationDecision {
    if session.is_logged_in() {
        NavigationDecision::Allow
    } else {
        NavigationDecision::login(redirects, path)
    }
}

/// Guards navigation with the route permission table.
#[derive(Debug, Clone, Copy)]
pub struct RouteGuard<'a> {
    evaluator: &'a AccessEvaluator,
    routes: &'a RouteMatcher,
    redirects: &'a RedirectPaths,
}

impl<'a> RouteGuard<'a> {
    pub fn new(
        evaluator: &'a AccessEvaluator,
        routes: &'a RouteMatcher,
        redirects: &'a RedirectPaths,
    ) -> Self {
        Self {
            evaluator,
            routes,
            redirects,
        }
    }

    /// Pure yes/no form used by hosts that redirect on their own.
    pub fn can_navigate(&self, path: &str, session: &impl SessionProvider) -> bool {
        session.is_logged_in()
            && self
                .routes
                .can_access(path, session.current_role_name(), self.evaluator)
    }

    pub fn check(&self, path: &str, session: &impl SessionProvider) -> NavigationDecision {
        if !session.is_logged_in() {
            return NavigationDecision::login(self.redirects, path);
        }
        let allowed = self
            .routes
            .can_access(path, session.current_role_name(), self.evaluator);
        if !allowed {
            tracing::debug!(
                path,
                role = session.current_role_name().unwrap_or("<none>"),
                "route guard denied navigation"
            );
        }
        NavigationDecision::from_check(allowed, self.redirects)
    }
}

/// Guards a single route that declares its own permission requirements.
#[derive(Debug, Clone, Copy)]
pub struct PermissionGuard<'a> {
    evaluator: &'a AccessEvaluator,
    required: &'a [RequiredPermission],
    redirects: &'a RedirectPaths,
}

impl<'a> PermissionGuard<'a> {
    pub fn new(
        evaluator: &'a AccessEvaluator,
        required: &'a [RequiredPermission],
        redirects: &'a RedirectPaths,
    ) -> Self {
        Self {
            evaluator,
            required,
            redirects,
        }
    }

    pub fn check(&self, path: &str, session: &impl SessionProvider) -> NavigationDecision {
        if !session.is_logged_in() {
            return NavigationDecision::login(self.redirects, path);
        }
        let role = session.current_role_name();
        let allowed = self.required.iter().all(|permission| {
            role.is_some_and(|role| {
                self.evaluator
                    .allows(role, &permission.resource, permission.action)
            })
        });
        NavigationDecision::from_check(allowed, self.redirects)
    }
}

/// Guards a single route restricted to a list of roles.
#[derive(Debug, Clone, Copy)]
pub struct RoleGuard<'a> {
    roles: &'a [String],
    redirects: &'a RedirectPaths,
}

impl<'a> RoleGuard<'a> {
    pub fn new(roles: &'a [String], redirects: &'a RedirectPaths) -> Self {
        Self { roles, redirects }
    }

    pub fn check(&self, path: &str, session: &impl SessionProvider) -> NavigationDecision {
        if !session.is_logged_in() {
            return NavigationDecision::login(self.redirects, path);
        }
        let allowed = session
            .current_role_name()
            .is_some_and(|role| self.roles.iter().any(|r| r == role));
        NavigationDecision::from_check(allowed, self.redirects)
    }
}
