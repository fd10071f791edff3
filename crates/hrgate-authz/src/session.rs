//! Session context consumed by guards and directives.
//!
//! The authentication layer owns the session; this crate only reads whether
//! one is active and which role it carries.
use serde::{Deserialize, Serialize};

/// Read-only view of the current session.
pub trait SessionProvider {
    fn is_logged_in(&self) -> bool;

    /// Role bound to the session. `None` is treated as an unknown role.
    fn current_role_name(&self) -> Option<&str>;
}

/// Plain session snapshot passed into every adapter call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub logged_in: bool,
    pub role: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(role: impl Into<String>) -> Self {
        Self {
            logged_in: true,
            role: Some(role.into()),
        }
    }

    /// Logged in, but the session carries no role.
    pub fn without_role() -> Self {
        Self {
            logged_in: true,
            role: None,
        }
    }
}

impl SessionProvider for SessionContext {
    fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    fn current_role_name(&self) -> Option<&str> {
        self.role.as_deref()
    }
}

impl<T: SessionProvider + ?Sized> SessionProvider for &T {
    fn is_logged_in(&self) -> bool {
        (**self).is_logged_in()
    }

    fn current_role_name(&self) -> Option<&str> {
        (**self).current_role_name()
    }
}
