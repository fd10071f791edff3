//! Casbin export of the permission matrix.
//!
//! # Purpose
//! Lets a trusted server mirror the console's rules: every allowed grant in
//! the matrix becomes one `p, role, resource, action` policy line.
//!
//! # Key invariants
//! - Denied and unconfigured grants produce no policy; Casbin's default deny
//!   then matches the evaluator's fail-closed behavior.
//! - Policies are emitted in role, permission, then action declaration order.
use crate::PermissionMatrix;
use casbin::{CoreApi, DefaultModel, Enforcer, MemoryAdapter, MgmtApi};

const MODEL: &str = r#"
[request_definition]
r = sub, obj, act

[policy_definition]
p = sub, obj, act

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = r.sub == p.sub && r.obj == p.obj && r.act == p.act
"#;

pub fn casbin_model_string() -> &'static str {
    MODEL
}

/// One `[role, resource, action]` rule per allowed grant.
pub fn casbin_policies(matrix: &PermissionMatrix) -> Vec<Vec<String>> {
    let mut policies = Vec::new();
    for role in matrix.roles() {
        for permission in &role.permissions {
            for grant in permission.actions.iter().filter(|grant| grant.allowed) {
                policies.push(vec![
                    role.name.clone(),
                    permission.resource.clone(),
                    grant.name.to_string(),
                ]);
            }
        }
    }
    policies
}

/// Build an in-memory enforcer loaded with the matrix's policies.
pub async fn build_enforcer(matrix: &PermissionMatrix) -> casbin::Result<Enforcer> {
    let model = DefaultModel::from_str(MODEL).await?;
    let adapter = MemoryAdapter::default();
    let mut enforcer = Enforcer::new(model, adapter).await?;
    let policies = casbin_policies(matrix);
    if !policies.is_empty() {
        enforcer.add_policies(policies).await?;
    }
    Ok(enforcer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessEvaluator, Action, builtin};

    #[test]
    fn model_string_contains_matcher() {
        let model = casbin_model_string();
        assert!(model.contains("request_definition"));
        assert!(model.contains("r.sub == p.sub"));
    }

    #[test]
    fn policies_skip_denied_grants() {
        let policies = casbin_policies(&builtin::permission_matrix());
        assert!(policies.contains(&vec![
            "manager".to_string(),
            "payroll".to_string(),
            "view".to_string()
        ]));
        assert!(!policies.contains(&vec![
            "manager".to_string(),
            "payroll".to_string(),
            "create".to_string()
        ]));
        assert!(!policies.iter().any(|rule| rule[0] == "guest"));
    }

    #[tokio::test]
    async fn enforcer_agrees_with_evaluator() {
        let matrix = builtin::permission_matrix();
        let enforcer = build_enforcer(&matrix).await.expect("enforcer");
        let evaluator = AccessEvaluator::new(matrix.clone(), builtin::menu_tree());

        let mut roles: Vec<&str> = matrix.roles().iter().map(|r| r.name.as_str()).collect();
        roles.push("ghost");
        for role in roles {
            for resource in matrix.resources() {
                for action in Action::ALL {
                    let expected = evaluator.allows(role, resource, action);
                    let actual = enforcer
                        .enforce((role, resource.as_str(), action.as_str()))
                        .expect("enforce");
                    assert_eq!(actual, expected, "{role}:{resource}:{action}");
                }
            }
        }
    }
}
