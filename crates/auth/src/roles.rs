use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use infoco_core::Required;

/// Role held by exactly one principal at a time.
///
/// The set is closed; adding a role means adding a row to
/// [`crate::CapabilityMatrix`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Director,
    Coordinator,
    Support,
}

impl Role {
    pub const COUNT: usize = 4;

    pub const ALL: [Role; Role::COUNT] = [Role::Admin, Role::Director, Role::Coordinator, Role::Support];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Director => "director",
            Role::Coordinator => "coordinator",
            Role::Support => "support",
        }
    }

    /// Display label shown next to the role in the dashboard.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Director => "Diretor",
            Role::Coordinator => "Coordenador",
            Role::Support => "Suporte",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl Required for Role {}
