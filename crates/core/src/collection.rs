//! Registry of the entity collections the dashboard persists.

use serde::{Deserialize, Serialize};

/// One keyed collection of records.
///
/// The set is closed: adding a business domain means adding a variant here,
/// which in turn forces a storage key and an authorization mapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Employees,
    Tasks,
    Municipalities,
    EmployeeExpenses,
    InternalExpenses,
    Assets,
    Notifications,
    Suppliers,
    Transactions,
    Payrolls,
    LeaveRequests,
    #[serde(rename = "users")]
    SystemUsers,
    UpdatePosts,
    ExternalSystems,
}

impl Collection {
    pub const ALL: [Collection; 14] = [
        Collection::Employees,
        Collection::Tasks,
        Collection::Municipalities,
        Collection::EmployeeExpenses,
        Collection::InternalExpenses,
        Collection::Assets,
        Collection::Notifications,
        Collection::Suppliers,
        Collection::Transactions,
        Collection::Payrolls,
        Collection::LeaveRequests,
        Collection::SystemUsers,
        Collection::UpdatePosts,
        Collection::ExternalSystems,
    ];

    /// Key under which the whole collection is persisted.
    pub const fn storage_key(self) -> &'static str {
        match self {
            Collection::Employees => "infoco_employees",
            Collection::Tasks => "infoco_tasks",
            Collection::Municipalities => "infoco_finance",
            Collection::EmployeeExpenses => "infoco_employee_expenses",
            Collection::InternalExpenses => "infoco_internal_expenses",
            Collection::Assets => "infoco_assets",
            Collection::Notifications => "infoco_notifications",
            Collection::Suppliers => "infoco_suppliers",
            Collection::Transactions => "infoco_transactions",
            Collection::Payrolls => "infoco_payrolls",
            Collection::LeaveRequests => "infoco_leave_requests",
            Collection::SystemUsers => "infoco_system_users",
            Collection::UpdatePosts => "infoco_update_posts",
            Collection::ExternalSystems => "infoco_external_systems",
        }
    }

    /// URL/log friendly name (matches the serde representation).
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Employees => "employees",
            Collection::Tasks => "tasks",
            Collection::Municipalities => "municipalities",
            Collection::EmployeeExpenses => "employee-expenses",
            Collection::InternalExpenses => "internal-expenses",
            Collection::Assets => "assets",
            Collection::Notifications => "notifications",
            Collection::Suppliers => "suppliers",
            Collection::Transactions => "transactions",
            Collection::Payrolls => "payrolls",
            Collection::LeaveRequests => "leave-requests",
            Collection::SystemUsers => "users",
            Collection::UpdatePosts => "update-posts",
            Collection::ExternalSystems => "external-systems",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
