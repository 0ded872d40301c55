//! Request-side authorization: which capability guards which collection,
//! checked against the live matrix on every call.

use infoco_auth::{authorize, Capability, Principal};
use infoco_core::Collection;

use crate::app::errors::ApiResult;
use crate::app::services::DashboardState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Capability of the tab that manages `collection`.
pub fn collection_capability(collection: Collection, access: Access) -> Capability {
    match collection {
        Collection::Employees => Capability::ManageEmployees,
        Collection::Tasks => Capability::ManageTasks,
        Collection::Municipalities | Collection::Transactions => Capability::ManageFinance,
        Collection::EmployeeExpenses | Collection::Payrolls | Collection::LeaveRequests => Capability::ManageHr,
        Collection::InternalExpenses | Collection::Suppliers => Capability::ManageInternalExpenses,
        Collection::Assets => Capability::ManageAssets,
        Collection::Notifications => Capability::ViewDashboard,
        Collection::SystemUsers => Capability::ManageUsers,
        Collection::UpdatePosts => match access {
            Access::Read => Capability::ViewDashboard,
            Access::Write => Capability::PostUpdates,
        },
        Collection::ExternalSystems => Capability::ManageSettings,
    }
}

/// The signed-in principal, provided its role holds `capability` right now.
pub fn require(state: &DashboardState, capability: Capability) -> ApiResult<&Principal> {
    let principal = state.principal()?;
    authorize(principal.role, capability, state.workspace.matrix())?;
    Ok(principal)
}

pub fn require_collection(
    state: &DashboardState,
    collection: Collection,
    access: Access,
) -> ApiResult<&Principal> {
    require(state, collection_capability(collection, access))
}
