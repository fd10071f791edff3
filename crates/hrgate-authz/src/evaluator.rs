//! Access evaluation over the permission matrix.
//!
//! # Purpose
//! Answers "can role R do action A on resource B" and derives the role's
//! accessible resources and menu entries.
//!
//! # How it fits
//! Route matching, guards, and directives all call into [`AccessEvaluator`];
//! no other component reads the matrix directly.
//!
//! # Key invariants
//! - Unknown role, resource, or action always evaluates to `false`.
//! - Evaluation is pure: results depend only on the matrix and arguments.
//!
//! # Examples
//! ```rust
//! use hrgate_authz::{AccessEvaluator, builtin};
//!
//! let evaluator = AccessEvaluator::new(builtin::permission_matrix(), builtin::menu_tree());
//! assert!(evaluator.has_permission("manager", "payroll", "view"));
//! assert!(!evaluator.has_permission("manager", "payroll", "delete"));
//! assert!(!evaluator.has_permission("nobody", "payroll", "view"));
//! ```
//!
//! # Common pitfalls
//! - Menu children are not filtered; a visible parent shows every child.
use crate::{Action, MenuItem, MenuTree, Permission, PermissionMatrix, PermissionQuery, Role};

#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    matrix: PermissionMatrix,
    menu: MenuTree,
}

impl AccessEvaluator {
    pub fn new(matrix: PermissionMatrix, menu: MenuTree) -> Self {
        Self { matrix, menu }
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    pub fn menu(&self) -> &MenuTree {
        &self.menu
    }

    /// Check a role/resource/action triple given as strings.
    ///
    /// Action names outside the [`Action`] enumeration are denied.
    pub fn has_permission(&self, role: &str, resource: &str, action: &str) -> bool {
        action
            .parse::<Action>()
            .is_ok_and(|action| self.allows(role, resource, action))
    }

    /// Typed form of [`has_permission`](Self::has_permission).
    pub fn allows(&self, role: &str, resource: &str, action: Action) -> bool {
        self.matrix
            .role(role)
            .and_then(|role| role.permission(resource))
            .is_some_and(|permission| permission.allows(action))
    }

    /// Evaluate a `resource:action` query string.
    ///
    /// Malformed queries are logged and denied.
    pub fn check_query(&self, role: &str, query: &str) -> bool {
        match PermissionQuery::parse(query) {
            Ok(query) => self.has_permission(role, &query.resource, &query.action),
            Err(err) => {
                tracing::warn!(query, error = %err, "malformed permission query");
                false
            }
        }
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.matrix.role(name)
    }

    /// Permissions declared for `role`; empty when the role is unknown.
    pub fn role_permissions(&self, role: &str) -> &[Permission] {
        self.matrix
            .role(role)
            .map(|role| role.permissions.as_slice())
            .unwrap_or_default()
    }

    /// Resources with at least one allowed action, in declaration order.
    pub fn accessible_resources(&self, role: &str) -> Vec<&str> {
        self.role_permissions(role)
            .iter()
            .filter(|permission| permission.any_allowed())
            .map(|permission| permission.resource.as_str())
            .collect()
    }

    /// Top-level menu items whose resource the role may `view`.
    pub fn accessible_menu_items(&self, role: &str) -> Vec<MenuItem> {
        // Children ride along with their parent unchecked.
        self.menu
            .items()
            .iter()
            .filter(|item| self.allows(role, &item.resource, Action::View))
            .cloned()
            .collect()
    }

    pub fn can_create(&self, role: &str, resource: &str) -> bool {
        self.has_permission(role, resource, "create")
    }

    pub fn can_read(&self, role: &str, resource: &str) -> bool {
        self.has_permission(role, resource, "read")
    }

    pub fn can_update(&self, role: &str, resource: &str) -> bool {
        self.has_permission(role, resource, "update")
    }

    pub fn can_delete(&self, role: &str, resource: &str) -> bool {
        self.has_permission(role, resource, "delete")
    }

    pub fn can_approve(&self, role: &str, resource: &str) -> bool {
        self.has_permission(role, resource, "approve")
    }

    pub fn can_export(&self, role: &str, resource: &str) -> bool {
        self.has_permission(role, resource, "export")
    }
}
