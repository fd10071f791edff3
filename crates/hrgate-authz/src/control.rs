//! Single entry point bundling the evaluator, route table, and redirects.
//!
//! Hosts usually build one [`AccessControl`] at startup, wrap it in an `Arc`,
//! and call it from their navigation and render hooks.
use crate::{
    AccessEvaluator, AuthzResult, MenuItem, NavigationDecision, RbacConfig, RedirectPaths,
    RenderDecision, RouteGuard, RouteMatcher, SessionProvider, directive,
};

#[derive(Debug, Clone)]
pub struct AccessControl {
    evaluator: AccessEvaluator,
    routes: RouteMatcher,
    redirects: RedirectPaths,
}

impl AccessControl {
    pub fn new(evaluator: AccessEvaluator, routes: RouteMatcher, redirects: RedirectPaths) -> Self {
        Self {
            evaluator,
            routes,
            redirects,
        }
    }

    pub fn from_config(config: RbacConfig) -> AuthzResult<Self> {
        let routes = config.route_matcher()?;
        let RbacConfig {
            matrix,
            menu,
            redirects,
            ..
        } = config;
        Ok(Self::new(AccessEvaluator::new(matrix, menu), routes, redirects))
    }

    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    pub fn routes(&self) -> &RouteMatcher {
        &self.routes
    }

    pub fn redirects(&self) -> &RedirectPaths {
        &self.redirects
    }

    pub fn route_guard(&self) -> RouteGuard<'_> {
        RouteGuard::new(&self.evaluator, &self.routes, &self.redirects)
    }

    pub fn can_navigate(&self, path: &str, session: &impl SessionProvider) -> bool {
        self.route_guard().can_navigate(path, session)
    }

    pub fn navigate(&self, path: &str, session: &impl SessionProvider) -> NavigationDecision {
        self.route_guard().check(path, session)
    }

    pub fn render(
        &self,
        query: &str,
        has_fallback: bool,
        session: &impl SessionProvider,
    ) -> RenderDecision {
        directive::permission_directive(query, has_fallback, session, &self.evaluator)
    }

    /// Menu for the session's role; empty without an active session.
    pub fn menu_for(&self, session: &impl SessionProvider) -> Vec<MenuItem> {
        if !session.is_logged_in() {
            return Vec::new();
        }
        session
            .current_role_name()
            .map(|role| self.evaluator.accessible_menu_items(role))
            .unwrap_or_default()
    }
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::from_config(RbacConfig::default()).expect("built-in access configuration must be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SessionContext, UnregisteredRoutePolicy};

    #[test]
    fn default_control_answers_end_to_end() {
        let control = AccessControl::default();
        let manager = SessionContext::authenticated("manager");
        assert!(control.can_navigate("/payroll", &manager));
        assert!(!control.navigate("/settings/users", &manager).is_allowed());
        assert_eq!(control.render("payroll:view", false, &manager), RenderDecision::SHOWN);
        assert_eq!(control.menu_for(&manager).len(), 6);
        assert!(control.menu_for(&SessionContext::anonymous()).is_empty());
        assert!(control.menu_for(&SessionContext::without_role()).is_empty());
    }

    #[test]
    fn from_config_carries_policy_and_redirects() {
        let mut config = RbacConfig::default();
        config.unregistered_routes = UnregisteredRoutePolicy::Deny;
        config.redirects.denied_redirect = "/home".to_string();
        let control = AccessControl::from_config(config).expect("control");
        let admin = SessionContext::authenticated("admin");
        assert_eq!(
            control.navigate("/zzz", &admin),
            NavigationDecision::Deny {
                redirect_to: "/home".to_string(),
                message: crate::ACCESS_DENIED_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn control_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccessControl>();
    }
}
