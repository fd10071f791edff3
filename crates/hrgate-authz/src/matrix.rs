//! Permission matrix: roles, resources, and per-resource action grants.
//!
//! # Purpose
//! Holds the static role/resource/action table every authorization decision
//! is answered from.
//!
//! # How it fits
//! The matrix is built once at startup (from the built-in console table or a
//! config document) and handed to the [`AccessEvaluator`](crate::AccessEvaluator).
//! Nothing mutates it afterwards.
//!
//! # Key invariants
//! - Role names are unique and case-sensitive.
//! - `default_role` names an existing role.
//! - A resource appears at most once per role; an action at most once per
//!   permission.
//! - Resources missing from the resource list are tolerated but logged.
//!
//! # Examples
//! ```rust
//! use hrgate_authz::{Action, ActionGrant, Permission, PermissionMatrix, Role};
//!
//! let matrix = PermissionMatrix::new(
//!     "viewer",
//!     vec!["dashboard".to_string()],
//!     vec![Role::new(
//!         "viewer",
//!         "Viewer",
//!         vec![Permission::new("dashboard", vec![ActionGrant::allow(Action::View)])],
//!     )],
//! )
//! .expect("valid matrix");
//! assert_eq!(matrix.default_role(), "viewer");
//! ```
//!
//! # Common pitfalls
//! - Declaring the same resource twice for a role is rejected, not merged.
use crate::{Action, AuthzError, AuthzResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single action on a resource and whether it is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionGrant {
    pub name: Action,
    pub allowed: bool,
}

impl ActionGrant {
    pub fn new(name: Action, allowed: bool) -> Self {
        Self { name, allowed }
    }

    pub fn allow(name: Action) -> Self {
        Self::new(name, true)
    }

    pub fn deny(name: Action) -> Self {
        Self::new(name, false)
    }
}

/// Ordered action grants for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub resource: String,
    pub actions: Vec<ActionGrant>,
}

impl Permission {
    pub fn new(resource: impl Into<String>, actions: Vec<ActionGrant>) -> Self {
        Self {
            resource: resource.into(),
            actions,
        }
    }

    /// Find the grant for `action`, if one is configured.
    pub fn grant(&self, action: Action) -> Option<&ActionGrant> {
        self.actions.iter().find(|grant| grant.name == action)
    }

    /// True only when `action` is configured and allowed.
    pub fn allows(&self, action: Action) -> bool {
        self.grant(action).is_some_and(|grant| grant.allowed)
    }

    pub fn any_allowed(&self) -> bool {
        self.actions.iter().any(|grant| grant.allowed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub name: String,
    pub display_name: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            permissions,
        }
    }

    /// Permission entry for `resource`, if the role declares one.
    pub fn permission(&self, resource: &str) -> Option<&Permission> {
        self.permissions
            .iter()
            .find(|permission| permission.resource == resource)
    }
}

/// Wire shape of the matrix, validated into [`PermissionMatrix`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PermissionMatrixDef {
    pub default_role: String,
    #[serde(default)]
    pub resources: Vec<String>,
    pub roles: Vec<Role>,
}

impl TryFrom<PermissionMatrixDef> for PermissionMatrix {
    type Error = AuthzError;

    fn try_from(def: PermissionMatrixDef) -> AuthzResult<Self> {
        PermissionMatrix::new(def.default_role, def.resources, def.roles)
    }
}

/// Validated, immutable role/resource/action table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PermissionMatrixDef")]
pub struct PermissionMatrix {
    default_role: String,
    resources: Vec<String>,
    roles: Vec<Role>,
}

impl PermissionMatrix {
    /// Build a matrix, rejecting configuration that violates its invariants.
    ///
    /// # Errors
    /// - [`AuthzError::DuplicateRole`] when two roles share a name.
    /// - [`AuthzError::UnknownDefaultRole`] when `default_role` is not defined.
    /// - [`AuthzError::DuplicatePermission`] when a role repeats a resource.
    /// - [`AuthzError::DuplicateAction`] when a permission repeats an action.
    pub fn new(
        default_role: impl Into<String>,
        resources: Vec<String>,
        roles: Vec<Role>,
    ) -> AuthzResult<Self> {
        let default_role = default_role.into();

        let mut role_names = HashSet::with_capacity(roles.len());
        for role in &roles {
            if !role_names.insert(role.name.as_str()) {
                return Err(AuthzError::DuplicateRole(role.name.clone()));
            }
            validate_role(role, &resources)?;
        }
        if !role_names.contains(default_role.as_str()) {
            return Err(AuthzError::UnknownDefaultRole(default_role));
        }

        Ok(Self {
            default_role,
            resources,
            roles,
        })
    }

    pub fn from_yaml_str(input: &str) -> AuthzResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> AuthzResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn default_role(&self) -> &str {
        &self.default_role
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// First role whose name equals `name`.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.name == name)
    }
}

fn validate_role(role: &Role, resources: &[String]) -> AuthzResult<()> {
    let mut seen_resources = HashSet::with_capacity(role.permissions.len());
    for permission in &role.permissions {
        if !seen_resources.insert(permission.resource.as_str()) {
            return Err(AuthzError::DuplicatePermission {
                role: role.name.clone(),
                resource: permission.resource.clone(),
            });
        }
        if !resources.iter().any(|known| *known == permission.resource) {
            // Tolerated, but almost always a typo in the config.
            tracing::warn!(
                role = %role.name,
                resource = %permission.resource,
                "permission references a resource missing from the resource list"
            );
        }

        let mut seen_actions = HashSet::with_capacity(permission.actions.len());
        for grant in &permission.actions {
            if !seen_actions.insert(grant.name) {
                return Err(AuthzError::DuplicateAction {
                    role: role.name.clone(),
                    resource: permission.resource.clone(),
                    action: grant.name.to_string(),
                });
            }
        }
    }
    Ok(())
}
