//! Route permission table and navigation matching.
//!
//! # Purpose
//! Resolves a navigation path to its access rule and decides whether a role
//! satisfies it.
//!
//! # Key invariants
//! - Rules are scanned in declaration order; the first match wins. A more
//!   specific rule declared later never overrides an earlier wildcard.
//! - A pattern ending in `/*` matches any path starting with the pattern minus
//!   that suffix (plain string prefix, not segment-aware).
//! - A matched rule with `required_role` ignores `required_permissions`.
//! - Paths with no matching rule follow [`UnregisteredRoutePolicy`], which
//!   defaults to allowing navigation.
//!
//! # Examples
//! ```rust
//! use hrgate_authz::{AccessEvaluator, RouteMatcher, UnregisteredRoutePolicy, builtin};
//!
//! let evaluator = AccessEvaluator::new(builtin::permission_matrix(), builtin::menu_tree());
//! let routes = RouteMatcher::new(builtin::route_permissions(), UnregisteredRoutePolicy::Allow)
//!     .expect("valid routes");
//! assert!(routes.can_access("/payroll", Some("manager"), &evaluator));
//! assert!(!routes.can_access("/settings/roles", Some("manager"), &evaluator));
//! ```
use crate::{AccessEvaluator, Action, AuthzError, AuthzResult};
use serde::{Deserialize, Serialize};

const WILDCARD_SUFFIX: &str = "/*";

/// A `(resource, action)` pair a route requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequiredPermission {
    pub resource: String,
    pub action: Action,
}

impl RequiredPermission {
    pub fn new(resource: impl Into<String>, action: Action) -> Self {
        Self {
            resource: resource.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePermission {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permissions: Option<Vec<RequiredPermission>>,
}

impl RoutePermission {
    /// Rule with no requirements; matching it always grants access.
    pub fn open(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required_role: None,
            required_permissions: None,
        }
    }

    pub fn for_roles<I, S>(path: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_role: Some(roles.into_iter().map(Into::into).collect()),
            ..Self::open(path)
        }
    }

    pub fn for_permissions(path: impl Into<String>, permissions: Vec<RequiredPermission>) -> Self {
        Self {
            required_permissions: Some(permissions),
            ..Self::open(path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(String),
    Prefix(String),
}

impl RoutePattern {
    /// Parse a route pattern.
    ///
    /// # Errors
    /// - [`AuthzError::InvalidRoutePattern`] for empty patterns or a `*` used
    ///   anywhere other than a trailing `/*`.
    pub fn parse(raw: &str) -> AuthzResult<Self> {
        if raw.is_empty() {
            return Err(AuthzError::InvalidRoutePattern(raw.to_string()));
        }
        if let Some(prefix) = raw.strip_suffix(WILDCARD_SUFFIX) {
            if prefix.contains('*') {
                return Err(AuthzError::InvalidRoutePattern(raw.to_string()));
            }
            return Ok(RoutePattern::Prefix(prefix.to_string()));
        }
        if raw.contains('*') {
            return Err(AuthzError::InvalidRoutePattern(raw.to_string()));
        }
        Ok(RoutePattern::Exact(raw.to_string()))
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(exact) => exact == path,
            RoutePattern::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

/// What to do with paths no rule matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnregisteredRoutePolicy {
    #[default]
    Allow,
    Deny,
}

impl std::str::FromStr for UnregisteredRoutePolicy {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(UnregisteredRoutePolicy::Allow),
            "deny" => Ok(UnregisteredRoutePolicy::Deny),
            other => Err(AuthzError::Config(format!(
                "unregistered route policy must be allow or deny, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    pattern: RoutePattern,
    rule: RoutePermission,
}

/// Ordered route rules plus the policy for unregistered paths.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    routes: Vec<CompiledRoute>,
    unregistered: UnregisteredRoutePolicy,
}

impl RouteMatcher {
    /// Compile the route table, validating every pattern up front.
    pub fn new(
        rules: Vec<RoutePermission>,
        unregistered: UnregisteredRoutePolicy,
    ) -> AuthzResult<Self> {
        let mut routes = Vec::with_capacity(rules.len());
        for rule in rules {
            let pattern = RoutePattern::parse(&rule.path)?;
            routes.push(CompiledRoute { pattern, rule });
        }
        Ok(Self {
            routes,
            unregistered,
        })
    }

    pub fn unregistered_policy(&self) -> UnregisteredRoutePolicy {
        self.unregistered
    }

    pub fn rules(&self) -> impl Iterator<Item = &RoutePermission> {
        self.routes.iter().map(|route| &route.rule)
    }

    /// First rule, in declaration order, whose pattern matches `path`.
    pub fn find(&self, path: &str) -> Option<&RoutePermission> {
        self.routes
            .iter()
            .find(|route| route.pattern.matches(path))
            .map(|route| &route.rule)
    }

    /// Decide whether `role` may navigate to `path`.
    ///
    /// A missing role is treated like an unknown one.
    pub fn can_access(&self, path: &str, role: Option<&str>, evaluator: &AccessEvaluator) -> bool {
        let Some(rule) = self.find(path) else {
            tracing::debug!(path, policy = ?self.unregistered, "no route rule matched");
            return self.unregistered == UnregisteredRoutePolicy::Allow;
        };
        tracing::debug!(path, rule = %rule.path, "route rule matched");

        if let Some(required_roles) = &rule.required_role {
            return role.is_some_and(|role| required_roles.iter().any(|r| r == role));
        }
        if let Some(required) = &rule.required_permissions {
            return required.iter().all(|permission| {
                role.is_some_and(|role| {
                    evaluator.allows(role, &permission.resource, permission.action)
                })
            });
        }
        true
    }
}
