//! Role → capability matrix with model-level immutability.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{Capability, CapabilitySet, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("capability '{capability}' of role '{role}' cannot be changed")]
    Immutable { role: Role, capability: Capability },
}

/// Mapping `Role → CapabilitySet`, total over both enums.
///
/// The admin row is always all-true, and `ManageSettings` / `ManageUsers`
/// keep their default value for every role. Both rules are enforced here,
/// on every write and on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityMatrix {
    rows: [CapabilitySet; Role::COUNT],
}

impl CapabilityMatrix {
    /// Capabilities of `role`. Total: every capability has a value.
    pub fn capabilities_for(&self, role: Role) -> CapabilitySet {
        self.rows[role.index()]
    }

    pub fn can(&self, role: Role, capability: Capability) -> bool {
        self.rows[role.index()].get(capability)
    }

    /// Whether a cell is fixed.
    pub fn is_immutable(role: Role, capability: Capability) -> bool {
        role == Role::Admin
            || matches!(capability, Capability::ManageSettings | Capability::ManageUsers)
    }

    /// Change one cell. Immutable cells are rejected and left untouched.
    pub fn set_capability(
        &mut self,
        role: Role,
        capability: Capability,
        value: bool,
    ) -> Result<(), PermissionError> {
        if Self::is_immutable(role, capability) {
            tracing::warn!(%role, %capability, value, "rejected edit of immutable capability");
            return Err(PermissionError::Immutable { role, capability });
        }
        self.rows[role.index()].set(capability, value);
        tracing::info!(%role, %capability, value, "capability updated");
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = (Role, CapabilitySet)> + '_ {
        Role::ALL.into_iter().map(|r| (r, self.rows[r.index()]))
    }

    /// Build from possibly partial persisted rows.
    ///
    /// A missing role gets an all-false row; immutable cells are reset to
    /// their defaults.
    pub fn from_rows(rows: BTreeMap<Role, CapabilitySet>) -> Self {
        let mut matrix = Self {
            rows: [CapabilitySet::none(); Role::COUNT],
        };
        for (role, set) in rows {
            matrix.rows[role.index()] = set;
        }
        matrix.normalize();
        matrix
    }

    fn normalize(&mut self) {
        let defaults = Self::default();
        for role in Role::ALL {
            for capability in Capability::ALL {
                if Self::is_immutable(role, capability) {
                    let value = defaults.can(role, capability);
                    self.rows[role.index()].set(capability, value);
                }
            }
        }
    }
}

impl Default for CapabilityMatrix {
    fn default() -> Self {
        use Capability::*;

        let director = CapabilitySet::from_granted([
            ViewDashboard,
            ManageDocuments,
            ManageEmployees,
            ManageTasks,
            ManageFinance,
            ManageNotes,
            ManageHr,
            ViewReports,
            ManageInternalExpenses,
            ManageAssets,
        ]);
        let coordinator = CapabilitySet::from_granted([
            ViewDashboard,
            ManageEmployees,
            ManageTasks,
            ManageHr,
            ViewReports,
        ]);
        let support = CapabilitySet::from_granted([ViewDashboard, ManageTasks]);

        Self {
            rows: [CapabilitySet::all(), director, coordinator, support],
        }
    }
}

impl Serialize for CapabilityMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: BTreeMap<Role, CapabilitySet> = self.rows().collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CapabilityMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = BTreeMap::<Role, CapabilitySet>::deserialize(deserializer)?;
        Ok(Self::from_rows(rows))
    }
}
