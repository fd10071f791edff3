//! Navigation menu table.
//!
//! The menu is plain configuration; the evaluator only filters it. A parent
//! item is shown when the role can `view` its resource, and its children are
//! then shown as declared without further checks.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub path: String,
    pub resource: String,
    pub label: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
}

impl MenuItem {
    pub fn new(
        path: impl Into<String>,
        resource: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            resource: resource.into(),
            label: label.into(),
            icon: icon.into(),
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn children(&self) -> &[MenuItem] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Ordered top-level menu entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuTree {
    items: Vec<MenuItem>,
}

impl MenuTree {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_default_to_empty() {
        let item = MenuItem::new("/dashboard", "dashboard", "Dashboard", "home");
        assert!(item.children().is_empty());
        let json = serde_json::to_string(&item).expect("serialize");
        assert!(!json.contains("children"));
    }

    #[test]
    fn menu_tree_serializes_as_list() {
        let tree = MenuTree::new(vec![
            MenuItem::new("/payroll", "payroll", "Payroll", "payments").with_children(vec![
                MenuItem::new("/payroll/runs", "payroll", "Pay Runs", "list"),
            ]),
        ]);
        let json = serde_json::to_value(&tree).expect("serialize");
        assert!(json.is_array());
        let parsed: MenuTree = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed.items()[0].children().len(), 1);
    }
}
