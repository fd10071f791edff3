//! Conditional-render decisions for view templates.
//!
//! A directive is a condition attached to a template block. The host asks it
//! whether to render the block, its fallback, or nothing:
//! - no session: nothing, even when a fallback exists;
//! - condition met: the block;
//! - condition failed: the fallback if one was supplied, otherwise nothing.
use crate::{AccessEvaluator, SessionProvider};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderDecision {
    pub show: bool,
    pub show_fallback: bool,
}

impl RenderDecision {
    pub const HIDDEN: RenderDecision = RenderDecision {
        show: false,
        show_fallback: false,
    };
    pub const SHOWN: RenderDecision = RenderDecision {
        show: true,
        show_fallback: false,
    };
    pub const FALLBACK: RenderDecision = RenderDecision {
        show: false,
        show_fallback: true,
    };

    fn resolve(allowed: bool, has_fallback: bool) -> Self {
        match (allowed, has_fallback) {
            (true, _) => RenderDecision::SHOWN,
            (false, true) => RenderDecision::FALLBACK,
            (false, false) => RenderDecision::HIDDEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveCondition {
    /// `resource:action` query string, as written in the template.
    Permission(String),
    /// Passes when the session role is any of these.
    AnyRole(Vec<String>),
}

/// Decide how to render a block guarded by a permission query.
pub fn permission_directive(
    query: &str,
    has_fallback: bool,
    session: &impl SessionProvider,
    evaluator: &AccessEvaluator,
) -> RenderDecision {
    evaluate(
        &DirectiveCondition::Permission(query.to_string()),
        has_fallback,
        session,
        evaluator,
    )
}

/// Decide how to render a block restricted to a list of roles.
pub fn role_directive(
    roles: &[String],
    has_fallback: bool,
    session: &impl SessionProvider,
    evaluator: &AccessEvaluator,
) -> RenderDecision {
    evaluate(
        &DirectiveCondition::AnyRole(roles.to_vec()),
        has_fallback,
        session,
        evaluator,
    )
}

fn evaluate(
    condition: &DirectiveCondition,
    has_fallback: bool,
    session: &impl SessionProvider,
    evaluator: &AccessEvaluator,
) -> RenderDecision {
    if !session.is_logged_in() {
        return RenderDecision::HIDDEN;
    }
    let role = session.current_role_name();
    let allowed = match condition {
        DirectiveCondition::Permission(query) => {
            role.is_some_and(|role| evaluator.check_query(role, query))
        }
        DirectiveCondition::AnyRole(roles) => {
            role.is_some_and(|role| roles.iter().any(|r| r == role))
        }
    };
    RenderDecision::resolve(allowed, has_fallback)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveState {
    Unattached,
    Attached(RenderDecision),
    Detached,
}

/// One directive bound to one template block.
///
/// The host drives the lifecycle: `attach` on mount, `refresh` whenever it
/// re-renders, `detach` on unmount.
#[derive(Debug, Clone)]
pub struct Directive {
    condition: DirectiveCondition,
    has_fallback: bool,
    state: DirectiveState,
}

impl Directive {
    pub fn new(condition: DirectiveCondition, has_fallback: bool) -> Self {
        Self {
            condition,
            has_fallback,
            state: DirectiveState::Unattached,
        }
    }

    pub fn permission(query: impl Into<String>) -> Self {
        Self::new(DirectiveCondition::Permission(query.into()), false)
    }

    pub fn any_role<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            DirectiveCondition::AnyRole(roles.into_iter().map(Into::into).collect()),
            false,
        )
    }

    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    pub fn state(&self) -> DirectiveState {
        self.state
    }

    pub fn attach(
        &mut self,
        session: &impl SessionProvider,
        evaluator: &AccessEvaluator,
    ) -> RenderDecision {
        let decision = evaluate(&self.condition, self.has_fallback, session, evaluator);
        self.state = DirectiveState::Attached(decision);
        decision
    }

    /// Re-evaluate an attached directive. Returns `None` once detached or
    /// before the first attach.
    pub fn refresh(
        &mut self,
        session: &impl SessionProvider,
        evaluator: &AccessEvaluator,
    ) -> Option<RenderDecision> {
        match self.state {
            DirectiveState::Attached(_) => Some(self.attach(session, evaluator)),
            DirectiveState::Unattached | DirectiveState::Detached => None,
        }
    }

    pub fn detach(&mut self) {
        self.state = DirectiveState::Detached;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SessionContext, builtin};

    fn evaluator() -> AccessEvaluator {
        AccessEvaluator::new(builtin::permission_matrix(), builtin::menu_tree())
    }

    #[test]
    fn permission_directive_outcomes() {
        let evaluator = evaluator();
        let manager = SessionContext::authenticated("manager");
        assert_eq!(
            permission_directive("payroll:view", false, &manager, &evaluator),
            RenderDecision::SHOWN
        );
        assert_eq!(
            permission_directive("payroll:delete", true, &manager, &evaluator),
            RenderDecision::FALLBACK
        );
        assert_eq!(
            permission_directive("payroll:delete", false, &manager, &evaluator),
            RenderDecision::HIDDEN
        );
    }

    #[test]
    fn malformed_query_is_denied() {
        let evaluator = evaluator();
        let admin = SessionContext::authenticated("admin");
        assert_eq!(
            permission_directive("payroll", false, &admin, &evaluator),
            RenderDecision::HIDDEN
        );
        assert_eq!(
            permission_directive("payroll", true, &admin, &evaluator),
            RenderDecision::FALLBACK
        );
    }

    #[test]
    fn anonymous_session_renders_nothing() {
        let evaluator = evaluator();
        let anonymous = SessionContext::anonymous();
        assert_eq!(
            permission_directive("dashboard:view", true, &anonymous, &evaluator),
            RenderDecision::HIDDEN
        );
        assert_eq!(
            role_directive(&["admin".to_string()], true, &anonymous, &evaluator),
            RenderDecision::HIDDEN
        );
    }

    #[test]
    fn roleless_session_is_denied() {
        let evaluator = evaluator();
        let session = SessionContext::without_role();
        assert_eq!(
            permission_directive("dashboard:view", true, &session, &evaluator),
            RenderDecision::FALLBACK
        );
    }

    #[test]
    fn role_directive_checks_membership() {
        let evaluator = evaluator();
        let roles = vec!["admin".to_string(), "hr-officer".to_string()];
        assert_eq!(
            role_directive(&roles, false, &SessionContext::authenticated("hr-officer"), &evaluator),
            RenderDecision::SHOWN
        );
        assert_eq!(
            role_directive(&roles, true, &SessionContext::authenticated("employee"), &evaluator),
            RenderDecision::FALLBACK
        );
    }

    #[test]
    fn directive_lifecycle() {
        let evaluator = evaluator();
        let mut directive = Directive::permission("payroll:approve").with_fallback();
        let manager = SessionContext::authenticated("manager");
        assert_eq!(directive.state(), DirectiveState::Unattached);
        assert_eq!(directive.refresh(&manager, &evaluator), None);

        let decision = directive.attach(&manager, &evaluator);
        assert_eq!(decision, RenderDecision::FALLBACK);
        assert_eq!(directive.state(), DirectiveState::Attached(RenderDecision::FALLBACK));

        let admin = SessionContext::authenticated("admin");
        assert_eq!(directive.refresh(&admin, &evaluator), Some(RenderDecision::SHOWN));

        directive.detach();
        assert_eq!(directive.state(), DirectiveState::Detached);
        assert_eq!(directive.refresh(&admin, &evaluator), None);
    }

    #[test]
    fn any_role_directive_builder() {
        let evaluator = evaluator();
        let mut directive = Directive::any_role(["admin"]);
        assert_eq!(
            directive.attach(&SessionContext::authenticated("admin"), &evaluator),
            RenderDecision::SHOWN
        );
    }
}
