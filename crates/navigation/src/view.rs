use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use infoco_auth::{Capability, Gated};

/// Navigable section of the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    Dashboard,
    UpdatesFeed,
    Database,
    Employees,
    Tasks,
    Finance,
    Notes,
    Hr,
    InternalExpenses,
    Assets,
    Municipalities,
    Reports,
    Settings,
    Users,
}

impl ViewId {
    pub const ALL: [ViewId; 14] = [
        ViewId::Dashboard,
        ViewId::UpdatesFeed,
        ViewId::Database,
        ViewId::Employees,
        ViewId::Tasks,
        ViewId::Finance,
        ViewId::Notes,
        ViewId::Hr,
        ViewId::InternalExpenses,
        ViewId::Assets,
        ViewId::Municipalities,
        ViewId::Reports,
        ViewId::Settings,
        ViewId::Users,
    ];

    pub fn as_str(self) -> &'static str {
        ViewRegistry::descriptor(self).key
    }

    /// Parse a view id coming from outside (links, requests); unknown ids
    /// resolve to the default view.
    pub fn parse_or_default(s: &str) -> ViewId {
        s.parse().unwrap_or(ViewRegistry::DEFAULT)
    }
}

impl core::fmt::Display for ViewId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown view '{0}'")]
pub struct UnknownView(pub String);

impl FromStr for ViewId {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

impl Gated for ViewId {
    fn required_capability(&self) -> Capability {
        ViewRegistry::descriptor(*self).required
    }
}

/// Static description of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDescriptor {
    pub id: ViewId,
    #[serde(skip)]
    pub key: &'static str,
    pub required: Capability,
    /// Menu label.
    pub label: &'static str,
    /// Page title.
    pub title: &'static str,
}

const fn view(
    id: ViewId,
    key: &'static str,
    required: Capability,
    label: &'static str,
    title: &'static str,
) -> ViewDescriptor {
    ViewDescriptor {
        id,
        key,
        required,
        label,
        title,
    }
}

static VIEWS: [ViewDescriptor; 14] = [
    view(ViewId::Dashboard, "dashboard", Capability::ViewDashboard, "Dashboard", "Dashboard"),
    view(ViewId::UpdatesFeed, "updates-feed", Capability::ViewDashboard, "Notas de Atualização", "Notas de Atualização"),
    view(ViewId::Database, "database", Capability::ManageDocuments, "Base de Dados", "Base de Dados de Municípios"),
    view(ViewId::Employees, "employees", Capability::ManageEmployees, "Funcionários", "Gerenciar Funcionários"),
    view(ViewId::Tasks, "tasks", Capability::ManageTasks, "Tarefas", "Gerenciar Tarefas"),
    view(ViewId::Finance, "finance", Capability::ManageFinance, "Financeiro", "Balanço Financeiro"),
    view(ViewId::Notes, "notes", Capability::ManageNotes, "Gestão de Notas", "Gestão de Notas de Pagamento"),
    view(ViewId::Hr, "hr", Capability::ManageHr, "Recursos Humanos", "Recursos Humanos"),
    view(ViewId::InternalExpenses, "internal-expenses", Capability::ManageInternalExpenses, "ADM Infoco", "ADM Infoco - Gastos Internos"),
    view(ViewId::Assets, "assets", Capability::ManageAssets, "Patrimônio", "Patrimônio da Empresa"),
    view(ViewId::Municipalities, "municipalities", Capability::ManageFinance, "Municípios", "Gerenciar Municípios"),
    view(ViewId::Reports, "reports", Capability::ViewReports, "Relatórios", "Relatórios e Análises"),
    view(ViewId::Settings, "settings", Capability::ManageSettings, "Configurações", "Configurações Gerais"),
    view(ViewId::Users, "users", Capability::ManageUsers, "Usuários", "Gerenciamento de Usuários"),
];

/// Registry of every view and the single capability gating it.
pub struct ViewRegistry;

impl ViewRegistry {
    /// Landing view and target of every redirect.
    pub const DEFAULT: ViewId = ViewId::Dashboard;

    pub fn descriptor(id: ViewId) -> &'static ViewDescriptor {
        &VIEWS[id as usize]
    }

    pub fn all() -> &'static [ViewDescriptor] {
        &VIEWS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_indexed_by_view() {
        for (i, id) in ViewId::ALL.into_iter().enumerate() {
            assert_eq!(VIEWS[i].id, id);
        }
    }

    #[test]
    fn keys_match_serde_names() {
        for id in ViewId::ALL {
            assert_eq!(
                serde_json::to_string(&id).unwrap(),
                format!("\"{}\"", id.as_str())
            );
        }
    }

    #[test]
    fn finance_and_municipalities_share_a_capability() {
        assert_eq!(
            ViewId::Finance.required_capability(),
            ViewId::Municipalities.required_capability()
        );
        assert_eq!(
            ViewId::UpdatesFeed.required_capability(),
            Capability::ViewDashboard
        );
    }

    #[test]
    fn unknown_ids_fall_back_to_default() {
        assert_eq!(ViewId::parse_or_default("organs"), ViewId::Dashboard);
        assert_eq!(ViewId::parse_or_default("hr"), ViewId::Hr);
    }
}
