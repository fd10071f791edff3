use crate::AuthzError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    View,
    Export,
    Approve,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::View,
        Action::Export,
        Action::Approve,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::View => "view",
            Action::Export => "export",
            Action::Approve => "approve",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "view" => Ok(Action::View),
            "export" => Ok(Action::Export),
            "approve" => Ok(Action::Approve),
            _ => Err(AuthzError::InvalidAction(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Action;
    use crate::AuthzError;

    #[test]
    fn action_string_roundtrip() {
        for action in Action::ALL {
            let as_str = action.as_str();
            assert_eq!(
                <Action as std::str::FromStr>::from_str(as_str).ok(),
                Some(action)
            );
            assert_eq!(action.to_string(), as_str);
        }
    }

    #[test]
    fn action_names_are_case_sensitive() {
        assert!(<Action as std::str::FromStr>::from_str("View").is_err());
        let err = <Action as std::str::FromStr>::from_str("publish").expect_err("unknown action");
        assert!(matches!(err, AuthzError::InvalidAction(ref name) if name == "publish"));
        assert_eq!(err.to_string(), "invalid action: publish");
    }

    #[test]
    fn action_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Action::Approve).expect("serialize");
        assert_eq!(json, "\"approve\"");
        let parsed: Action = serde_json::from_str("\"export\"").expect("deserialize");
        assert_eq!(parsed, Action::Export);
    }
}
