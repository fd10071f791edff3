//! `resource:action` permission queries used at the template boundary.
//!
//! # Key invariants
//! - Exactly one colon separates the two parts.
//! - Both parts must be non-empty; anything else is malformed.
//! - A well-formed query naming an unknown action is not malformed; it simply
//!   evaluates to "not permitted".
use crate::{AuthzError, AuthzResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionQuery {
    pub resource: String,
    pub action: String,
}

impl PermissionQuery {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// Parse a `resource:action` string.
    ///
    /// # Errors
    /// - [`AuthzError::InvalidPermission`] unless there is exactly one colon
    ///   with a non-empty part on each side.
    pub fn parse(value: &str) -> AuthzResult<Self> {
        value.parse()
    }

    pub fn as_string(&self) -> String {
        format!("{}:{}", self.resource, self.action)
    }
}

impl std::str::FromStr for PermissionQuery {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (resource, action) = value
            .split_once(':')
            .ok_or_else(|| AuthzError::InvalidPermission(value.to_string()))?;
        if resource.is_empty() || action.is_empty() || action.contains(':') {
            return Err(AuthzError::InvalidPermission(value.to_string()));
        }
        Ok(Self::new(resource, action))
    }
}

impl std::fmt::Display for PermissionQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_resource_and_action() {
        let query = PermissionQuery::parse("payroll:view").expect("parse");
        assert_eq!(query.resource, "payroll");
        assert_eq!(query.action, "view");
        assert_eq!(query.to_string(), "payroll:view");
    }

    #[test]
    fn parse_rejects_missing_colon() {
        let err = PermissionQuery::parse("payroll").expect_err("missing colon");
        assert!(matches!(err, AuthzError::InvalidPermission(_)));
    }

    #[test]
    fn parse_rejects_empty_parts() {
        assert!(PermissionQuery::parse(":view").is_err());
        assert!(PermissionQuery::parse("payroll:").is_err());
        assert!(PermissionQuery::parse(":").is_err());
    }

    #[test]
    fn parse_keeps_unknown_actions() {
        let query = PermissionQuery::parse("payroll:publish").expect("well formed");
        assert_eq!(query.action, "publish");
    }

    #[test]
    fn parse_rejects_extra_colons() {
        for value in ["payroll:view:extra", "payroll::view", "payroll:view:"] {
            let err = PermissionQuery::parse(value).expect_err("extra colon");
            assert!(matches!(err, AuthzError::InvalidPermission(ref raw) if raw == value));
        }
    }
}
