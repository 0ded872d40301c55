//! Capability catalogue and the total per-role capability set.

use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Named boolean permission.
///
/// The wire names are the keys the dashboard has always persisted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "canViewDashboard")]
    ViewDashboard,
    #[serde(rename = "canManageDocuments")]
    ManageDocuments,
    #[serde(rename = "canManageEmployees")]
    ManageEmployees,
    #[serde(rename = "canManageTasks")]
    ManageTasks,
    /// Gates both finance and municipalities.
    #[serde(rename = "canManageFinance")]
    ManageFinance,
    #[serde(rename = "canManageHR")]
    ManageHr,
    #[serde(rename = "canViewReports")]
    ViewReports,
    #[serde(rename = "canManageInternalExpenses")]
    ManageInternalExpenses,
    #[serde(rename = "canManageAssets")]
    ManageAssets,
    #[serde(rename = "canManageSettings")]
    ManageSettings,
    #[serde(rename = "canManageNotes")]
    ManageNotes,
    #[serde(rename = "canManageUsers")]
    ManageUsers,
    #[serde(rename = "canPostUpdates")]
    PostUpdates,
}

impl Capability {
    pub const COUNT: usize = 13;

    pub const ALL: [Capability; Capability::COUNT] = [
        Capability::ViewDashboard,
        Capability::ManageDocuments,
        Capability::ManageEmployees,
        Capability::ManageTasks,
        Capability::ManageFinance,
        Capability::ManageHr,
        Capability::ViewReports,
        Capability::ManageInternalExpenses,
        Capability::ManageAssets,
        Capability::ManageSettings,
        Capability::ManageNotes,
        Capability::ManageUsers,
        Capability::PostUpdates,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::ViewDashboard => "canViewDashboard",
            Capability::ManageDocuments => "canManageDocuments",
            Capability::ManageEmployees => "canManageEmployees",
            Capability::ManageTasks => "canManageTasks",
            Capability::ManageFinance => "canManageFinance",
            Capability::ManageHr => "canManageHR",
            Capability::ViewReports => "canViewReports",
            Capability::ManageInternalExpenses => "canManageInternalExpenses",
            Capability::ManageAssets => "canManageAssets",
            Capability::ManageSettings => "canManageSettings",
            Capability::ManageNotes => "canManageNotes",
            Capability::ManageUsers => "canManageUsers",
            Capability::PostUpdates => "canPostUpdates",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Capability::ViewDashboard => "Visualizar Dashboard",
            Capability::ManageDocuments => "Gerenciar Base de Dados",
            Capability::ManageEmployees => "Gerenciar Funcionários",
            Capability::ManageTasks => "Gerenciar Tarefas",
            Capability::ManageFinance => "Gerenciar Financeiro e Municípios",
            Capability::ManageHr => "Gerenciar Recursos Humanos",
            Capability::ViewReports => "Visualizar Relatórios",
            Capability::ManageInternalExpenses => "Gerenciar ADM Infoco",
            Capability::ManageAssets => "Gerenciar Patrimônio",
            Capability::ManageSettings => "Acessar Configurações",
            Capability::ManageNotes => "Gerenciar Notas de Pagamento",
            Capability::ManageUsers => "Gerenciar Usuários",
            Capability::PostUpdates => "Publicar Atualizações",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown capability '{0}'")]
pub struct UnknownCapability(pub String);

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCapability(s.to_string()))
    }
}

/// Capabilities of one role: a value for every [`Capability`], never partial.
///
/// Serialized as a `{ capabilityName: bool }` map. When deserializing, absent
/// names are `false` and unrecognised names are ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    granted: [bool; Capability::COUNT],
}

impl CapabilitySet {
    pub const fn none() -> Self {
        Self {
            granted: [false; Capability::COUNT],
        }
    }

    pub const fn all() -> Self {
        Self {
            granted: [true; Capability::COUNT],
        }
    }

    pub fn from_granted<I>(caps: I) -> Self
    where
        I: IntoIterator<Item = Capability>,
    {
        let mut set = Self::none();
        for cap in caps {
            set.set(cap, true);
        }
        set
    }

    pub const fn get(&self, capability: Capability) -> bool {
        self.granted[capability.index()]
    }

    pub fn set(&mut self, capability: Capability, value: bool) {
        self.granted[capability.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Capability, bool)> + '_ {
        Capability::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        self.iter().filter(|(_, v)| *v).map(|(c, _)| c)
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Capability::COUNT))?;
        for (cap, value) in self.iter() {
            map.serialize_entry(cap.as_str(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CapabilitySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut set = Self::none();
        for (name, value) in raw {
            if let Ok(cap) = name.parse::<Capability>() {
                set.set(cap, value);
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_follow_catalogue_order() {
        for (i, cap) in Capability::ALL.into_iter().enumerate() {
            assert_eq!(cap.index(), i);
        }
    }

    #[test]
    fn wire_names_round_trip() {
        for cap in Capability::ALL {
            let json = serde_json::to_string(&cap).unwrap();
            assert_eq!(json, format!("\"{}\"", cap.as_str()));
            assert_eq!(cap.as_str().parse::<Capability>().unwrap(), cap);
        }
    }

    #[test]
    fn missing_keys_default_to_false_and_unknown_keys_are_ignored() {
        let json = serde_json::json!({ "canManageTasks": true, "canFly": true });
        let set: CapabilitySet = serde_json::from_value(json).unwrap();

        assert!(set.get(Capability::ManageTasks));
        assert_eq!(set.granted().count(), 1);
    }

    #[test]
    fn serialized_set_names_every_capability() {
        let value = serde_json::to_value(CapabilitySet::none()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), Capability::COUNT);
        assert!(obj.values().all(|v| v == &serde_json::Value::Bool(false)));
    }
}
