//! Role-based access decisions for the HR administration console.
//!
//! # Purpose
//! Centralizes the role/resource/action permission matrix, the evaluator that
//! answers authorization questions against it, route matching, and the guard
//! and directive adapters the console's navigation and view layers call.
//!
//! # How it fits
//! The matrix, route table, and menu are loaded once at startup (built-in
//! defaults or [`RbacConfig`]). Navigation hooks call a [`RouteGuard`], view
//! templates call the directive helpers, and the sidebar asks for
//! [`AccessEvaluator::accessible_menu_items`]. Everything funnels through
//! [`AccessEvaluator`].
//!
//! # Key invariants
//! - Unknown roles, resources, and actions are denied (fail closed).
//! - Paths with no route rule are allowed unless
//!   [`UnregisteredRoutePolicy::Deny`] is configured.
//! - Configuration is immutable after construction; evaluation is pure.
//!
//! # Examples
//! ```rust
//! use hrgate_authz::{AccessControl, RenderDecision, SessionContext};
//!
//! let control = AccessControl::default();
//! let session = SessionContext::authenticated("manager");
//! assert!(control.can_navigate("/payroll", &session));
//! assert_eq!(control.render("payroll:delete", false, &session), RenderDecision::HIDDEN);
//! ```
//!
//! # Common pitfalls
//! - This is a client-side decision engine; a trusted server must enforce the
//!   same rules (see [`casbin_policies`]).
//! - Menu children are shown whenever their parent is, without their own check.

mod action;
pub mod builtin;
mod casbin_model;
mod config;
mod control;
pub mod directive;
mod errors;
mod evaluator;
mod guard;
mod matrix;
mod menu;
mod query;
mod route;
mod session;

pub use action::Action;
pub use casbin_model::{build_enforcer, casbin_model_string, casbin_policies};
pub use config::{
    ENV_CONFIG_PATH, ENV_DENIED_REDIRECT, ENV_LOGIN_PATH, ENV_UNREGISTERED_ROUTES, RbacConfig,
};
pub use control::AccessControl;
pub use directive::{
    Directive, DirectiveCondition, DirectiveState, RenderDecision, permission_directive,
    role_directive,
};
pub use errors::{AuthzError, AuthzResult};
pub use evaluator::AccessEvaluator;
pub use guard::{
    ACCESS_DENIED_MESSAGE, DEFAULT_DENIED_REDIRECT, DEFAULT_LOGIN_PATH, NavigationDecision,
    PermissionGuard, RedirectPaths, RoleGuard, RouteGuard, authenticated_guard,
};
pub use matrix::{ActionGrant, Permission, PermissionMatrix, Role};
pub use menu::{MenuItem, MenuTree};
pub use query::PermissionQuery;
pub use route::{
    RequiredPermission, RouteMatcher, RoutePattern, RoutePermission, UnregisteredRoutePolicy,
};
pub use session::{SessionContext, SessionProvider};
