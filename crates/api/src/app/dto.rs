//! Request bodies and response shapes that are not domain types themselves.

use serde::{Deserialize, Serialize};

use infoco_auth::{Capability, CapabilityMatrix, CapabilitySet, Principal, Role};
use infoco_business::MonthYear;
use infoco_navigation::{GateState, Menu, NavigationGate};

#[derive(Debug, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for Items<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    pub avatar: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectViewRequest {
    /// Unknown ids land on the default view.
    pub view: String,
}

#[derive(Debug, Deserialize)]
pub struct CapabilityUpdate {
    pub value: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePayrollRequest {
    pub month_year: MonthYear,
}

#[derive(Debug, Deserialize)]
pub struct LoginImageRequest {
    /// `null` restores the default image.
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NavigationView {
    #[serde(flatten)]
    pub state: GateState,
    pub menu: Menu,
}

impl NavigationView {
    pub fn new(gate: &NavigationGate, capabilities: &CapabilitySet) -> Self {
        Self {
            state: gate.state(),
            menu: Menu::build(gate, capabilities),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub principal: Principal,
    #[serde(rename = "roleLabel")]
    pub role_label: &'static str,
    pub capabilities: CapabilitySet,
    pub navigation: NavigationView,
}

impl SessionView {
    pub fn new(principal: Principal, capabilities: &CapabilitySet, gate: &NavigationGate) -> Self {
        Self {
            role_label: principal.role.label(),
            principal,
            capabilities: *capabilities,
            navigation: NavigationView::new(gate, capabilities),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityCell {
    pub capability: Capability,
    pub label: &'static str,
    pub granted: bool,
    pub editable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRow {
    pub role: Role,
    pub label: &'static str,
    pub capabilities: Vec<CapabilityCell>,
}

/// The matrix as the settings screen shows it.
pub fn permission_rows(matrix: &CapabilityMatrix) -> Vec<RoleRow> {
    matrix
        .rows()
        .map(|(role, set)| RoleRow {
            role,
            label: role.label(),
            capabilities: set
                .iter()
                .map(|(capability, granted)| CapabilityCell {
                    capability,
                    label: capability.label(),
                    granted,
                    editable: !CapabilityMatrix::is_immutable(role, capability),
                })
                .collect(),
        })
        .collect()
}
