//! Access configuration loading.
//!
//! # Purpose
//! Assembles the permission matrix, route table, menu, and redirect settings
//! from built-in defaults, environment variables, and an optional YAML/JSON
//! document.
//!
//! # Important configuration
//! - `HRGATE_RBAC_CONFIG`: path to a YAML (or `.json`) override document.
//! - `HRGATE_UNREGISTERED_ROUTES`: `allow` (default) or `deny`.
//! - `HRGATE_LOGIN_PATH`: login redirect target (default `/login`).
//! - `HRGATE_DENIED_REDIRECT`: redirect target after a denial (default
//!   `/dashboard`).
//!
//! # Key invariants
//! - Document keys override whole sections; omitted keys keep the current
//!   value.
//! - The final matrix and route table are validated before they are returned.
//!
//! # Common pitfalls
//! - Replacing `roles` without `defaultRole` keeps the built-in default role,
//!   which must then still exist in the new role list.
use crate::{
    AuthzError, AuthzResult, MenuTree, PermissionMatrix, RedirectPaths, Role, RouteMatcher,
    RoutePermission, UnregisteredRoutePolicy, builtin,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const ENV_CONFIG_PATH: &str = "HRGATE_RBAC_CONFIG";
pub const ENV_UNREGISTERED_ROUTES: &str = "HRGATE_UNREGISTERED_ROUTES";
pub const ENV_LOGIN_PATH: &str = "HRGATE_LOGIN_PATH";
pub const ENV_DENIED_REDIRECT: &str = "HRGATE_DENIED_REDIRECT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbacConfig {
    pub matrix: PermissionMatrix,
    pub route_permissions: Vec<RoutePermission>,
    pub menu: MenuTree,
    pub unregistered_routes: UnregisteredRoutePolicy,
    pub redirects: RedirectPaths,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            matrix: builtin::permission_matrix(),
            route_permissions: builtin::route_permissions(),
            menu: builtin::menu_tree(),
            unregistered_routes: UnregisteredRoutePolicy::default(),
            redirects: RedirectPaths::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RbacConfigOverride {
    default_role: Option<String>,
    resources: Option<Vec<String>>,
    roles: Option<Vec<Role>>,
    route_permissions: Option<Vec<RoutePermission>>,
    menu: Option<MenuTree>,
    unregistered_routes: Option<UnregisteredRoutePolicy>,
    login_path: Option<String>,
    denied_redirect: Option<String>,
}

impl RbacConfig {
    /// Built-in defaults adjusted by the `HRGATE_*` environment variables.
    pub fn from_env() -> AuthzResult<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(ENV_UNREGISTERED_ROUTES) {
            config.unregistered_routes = value.parse()?;
        }
        if let Ok(value) = std::env::var(ENV_LOGIN_PATH) {
            config.redirects.login_path = value;
        }
        if let Ok(value) = std::env::var(ENV_DENIED_REDIRECT) {
            config.redirects.denied_redirect = value;
        }
        Ok(config)
    }

    /// [`from_env`](Self::from_env), then the document named by
    /// `HRGATE_RBAC_CONFIG` if it is set.
    pub fn from_env_or_file() -> AuthzResult<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            config.apply_file(Path::new(&path))?;
        }
        Ok(config)
    }

    /// [`from_env`](Self::from_env), then an explicit document in place of
    /// `HRGATE_RBAC_CONFIG`.
    pub fn from_path(path: &Path) -> AuthzResult<Self> {
        let mut config = Self::from_env()?;
        config.apply_file(path)?;
        Ok(config)
    }

    pub fn from_yaml_str(input: &str) -> AuthzResult<Self> {
        let mut config = Self::default();
        config.apply(serde_yaml::from_str(input)?)?;
        Ok(config)
    }

    pub fn from_json_str(input: &str) -> AuthzResult<Self> {
        let mut config = Self::default();
        config.apply(serde_json::from_str(input)?)?;
        Ok(config)
    }

    /// Compile the route table with the configured unregistered-route policy.
    pub fn route_matcher(&self) -> AuthzResult<RouteMatcher> {
        RouteMatcher::new(self.route_permissions.clone(), self.unregistered_routes)
    }

    fn apply_file(&mut self, path: &Path) -> AuthzResult<()> {
        let contents = fs::read_to_string(path).map_err(|source| AuthzError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let override_cfg: RbacConfigOverride = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        tracing::info!(path = %path.display(), "loaded access configuration");
        self.apply(override_cfg)
    }

    fn apply(&mut self, override_cfg: RbacConfigOverride) -> AuthzResult<()> {
        let RbacConfigOverride {
            default_role,
            resources,
            roles,
            route_permissions,
            menu,
            unregistered_routes,
            login_path,
            denied_redirect,
        } = override_cfg;

        if default_role.is_some() || resources.is_some() || roles.is_some() {
            let default_role =
                default_role.unwrap_or_else(|| self.matrix.default_role().to_string());
            let resources = resources.unwrap_or_else(|| self.matrix.resources().to_vec());
            let roles = roles.unwrap_or_else(|| self.matrix.roles().to_vec());
            self.matrix = PermissionMatrix::new(default_role, resources, roles)?;
        }
        if let Some(value) = route_permissions {
            self.route_permissions = value;
        }
        if let Some(value) = menu {
            self.menu = value;
        }
        if let Some(value) = unregistered_routes {
            self.unregistered_routes = value;
        }
        if let Some(value) = login_path {
            self.redirects.login_path = value;
        }
        if let Some(value) = denied_redirect {
            self.redirects.denied_redirect = value;
        }

        // Fail on bad patterns now rather than on first navigation.
        self.route_matcher()?;
        Ok(())
    }
}
