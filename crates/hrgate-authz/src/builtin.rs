//! Built-in access configuration for the HR admin console.
//!
//! Used whenever no configuration document is supplied. The tables here are
//! the console's shipped defaults; deployments override them wholesale through
//! [`RbacConfig`](crate::RbacConfig).
use crate::{
    Action, ActionGrant, MenuItem, MenuTree, Permission, PermissionMatrix, RequiredPermission,
    Role, RoutePermission,
};

pub const DASHBOARD: &str = "dashboard";
pub const EMPLOYEE_MANAGEMENT: &str = "employee-management";
pub const PAYROLL: &str = "payroll";
pub const LEAVE_MANAGEMENT: &str = "leave-management";
pub const REPORTS: &str = "reports";
pub const NOTIFICATIONS: &str = "notifications";
pub const SETTINGS: &str = "settings";

pub const RESOURCES: [&str; 7] = [
    DASHBOARD,
    EMPLOYEE_MANAGEMENT,
    PAYROLL,
    LEAVE_MANAGEMENT,
    REPORTS,
    NOTIFICATIONS,
    SETTINGS,
];

pub const DEFAULT_ROLE: &str = "employee";

fn grants(allowed: &[Action], denied: &[Action]) -> Vec<ActionGrant> {
    allowed
        .iter()
        .map(|action| ActionGrant::allow(*action))
        .chain(denied.iter().map(|action| ActionGrant::deny(*action)))
        .collect()
}

fn admin() -> Role {
    let permissions = RESOURCES
        .iter()
        .map(|resource| Permission::new(*resource, grants(&Action::ALL, &[])))
        .collect();
    Role::new("admin", "Administrator", permissions)
}

fn hr_officer() -> Role {
    use Action::*;
    Role::new(
        "hr-officer",
        "HR Officer",
        vec![
            Permission::new(DASHBOARD, grants(&[View], &[])),
            Permission::new(
                EMPLOYEE_MANAGEMENT,
                grants(&[View, Read, Create, Update, Approve, Export], &[Delete]),
            ),
            Permission::new(PAYROLL, grants(&[View, Read, Export], &[Create, Update])),
            Permission::new(LEAVE_MANAGEMENT, grants(&[View, Read, Approve], &[])),
            Permission::new(REPORTS, grants(&[View, Read, Export], &[])),
            Permission::new(NOTIFICATIONS, grants(&[View, Read], &[])),
            Permission::new(SETTINGS, grants(&[], &[View])),
        ],
    )
}

fn manager() -> Role {
    use Action::*;
    Role::new(
        "manager",
        "Department Manager",
        vec![
            Permission::new(DASHBOARD, grants(&[View], &[])),
            Permission::new(EMPLOYEE_MANAGEMENT, grants(&[View, Read], &[Update])),
            Permission::new(PAYROLL, grants(&[View, Read], &[Create, Update])),
            Permission::new(LEAVE_MANAGEMENT, grants(&[View, Read, Approve], &[])),
            Permission::new(REPORTS, grants(&[View, Read], &[])),
            Permission::new(NOTIFICATIONS, grants(&[View, Read], &[])),
        ],
    )
}

fn employee() -> Role {
    use Action::*;
    Role::new(
        "employee",
        "Employee",
        vec![
            Permission::new(DASHBOARD, grants(&[View], &[])),
            Permission::new(PAYROLL, grants(&[], &[View])),
            Permission::new(LEAVE_MANAGEMENT, grants(&[View, Read, Create], &[])),
            Permission::new(NOTIFICATIONS, grants(&[View, Read], &[])),
        ],
    )
}

fn guest() -> Role {
    Role::new(
        "guest",
        "Guest",
        vec![Permission::new(DASHBOARD, grants(&[], &[Action::View]))],
    )
}

/// The console's shipped permission matrix.
pub fn permission_matrix() -> PermissionMatrix {
    let roles = vec![admin(), hr_officer(), manager(), employee(), guest()];
    let resources = RESOURCES.iter().map(|r| r.to_string()).collect();
    PermissionMatrix::new(DEFAULT_ROLE, resources, roles)
        .expect("built-in permission matrix must be valid")
}

pub fn menu_tree() -> MenuTree {
    MenuTree::new(vec![
        MenuItem::new("/dashboard", DASHBOARD, "Dashboard", "dashboard"),
        MenuItem::new("/employees", EMPLOYEE_MANAGEMENT, "Employee Management", "people")
            .with_children(vec![
                MenuItem::new("/employees", EMPLOYEE_MANAGEMENT, "Employees", "badge"),
                MenuItem::new(
                    "/employees/promotions",
                    EMPLOYEE_MANAGEMENT,
                    "Promotions",
                    "trending_up",
                ),
                MenuItem::new(
                    "/employees/transfers",
                    EMPLOYEE_MANAGEMENT,
                    "Transfers",
                    "swap_horiz",
                ),
                MenuItem::new(
                    "/employees/retirements",
                    EMPLOYEE_MANAGEMENT,
                    "Retirements",
                    "event_busy",
                ),
            ]),
        MenuItem::new("/payroll", PAYROLL, "Payroll", "payments"),
        MenuItem::new("/leave", LEAVE_MANAGEMENT, "Leave Management", "beach_access"),
        MenuItem::new("/reports", REPORTS, "Reports", "bar_chart"),
        MenuItem::new("/notifications", NOTIFICATIONS, "Notifications", "notifications"),
        MenuItem::new("/settings", SETTINGS, "Settings", "settings"),
    ])
}

pub fn route_permissions() -> Vec<RoutePermission> {
    use Action::*;
    vec![
        RoutePermission::for_permissions(
            "/dashboard",
            vec![RequiredPermission::new(DASHBOARD, View)],
        ),
        RoutePermission::for_permissions(
            "/employees/new",
            vec![
                RequiredPermission::new(EMPLOYEE_MANAGEMENT, View),
                RequiredPermission::new(EMPLOYEE_MANAGEMENT, Create),
            ],
        ),
        RoutePermission::for_permissions(
            "/employees/promotions/*",
            vec![
                RequiredPermission::new(EMPLOYEE_MANAGEMENT, View),
                RequiredPermission::new(EMPLOYEE_MANAGEMENT, Approve),
            ],
        ),
        RoutePermission::for_permissions(
            "/employees/*",
            vec![RequiredPermission::new(EMPLOYEE_MANAGEMENT, View)],
        ),
        RoutePermission::for_permissions("/payroll/*", vec![RequiredPermission::new(PAYROLL, View)]),
        RoutePermission::for_permissions(
            "/leave/*",
            vec![RequiredPermission::new(LEAVE_MANAGEMENT, View)],
        ),
        RoutePermission::for_permissions("/reports/*", vec![RequiredPermission::new(REPORTS, View)]),
        RoutePermission::for_permissions(
            "/notifications",
            vec![RequiredPermission::new(NOTIFICATIONS, View)],
        ),
        RoutePermission::for_roles("/settings/*", ["admin"]),
        RoutePermission::open("/profile"),
    ]
}
