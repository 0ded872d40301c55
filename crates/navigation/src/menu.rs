//! Navigation menu filtered by capability.
//!
//! A role never sees an entry for a view it cannot reach.

use serde::Serialize;

use infoco_auth::{Capability, CapabilitySet};

use crate::{NavigationGate, ViewId, ViewRegistry};

enum Item {
    View(ViewId),
    Group {
        key: &'static str,
        label: &'static str,
        required: Capability,
        children: &'static [ViewId],
    },
}

const SIDEBAR: [Item; 13] = [
    Item::View(ViewId::Dashboard),
    Item::View(ViewId::UpdatesFeed),
    Item::Group {
        key: "organs",
        label: "Órgãos",
        required: Capability::ManageDocuments,
        children: &[ViewId::Database],
    },
    Item::View(ViewId::Employees),
    Item::View(ViewId::Tasks),
    Item::View(ViewId::Finance),
    Item::View(ViewId::Notes),
    Item::View(ViewId::Hr),
    Item::View(ViewId::InternalExpenses),
    Item::View(ViewId::Assets),
    Item::View(ViewId::Municipalities),
    Item::View(ViewId::Reports),
    Item::View(ViewId::Users),
];

/// Reached from the account dropdown rather than the sidebar.
const ACCOUNT: [ViewId; 1] = [ViewId::Settings];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub key: &'static str,
    pub label: &'static str,
    /// `None` for a group header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewId>,
    pub active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub active: ViewId,
    pub title: &'static str,
    pub sidebar: Vec<MenuEntry>,
    pub account: Vec<MenuEntry>,
}

impl Menu {
    /// Menu for `capabilities` with the gate's active view highlighted.
    ///
    /// Only views whose capability is held are listed, the default view
    /// included; the gate still falls back to it silently.
    pub fn build(gate: &NavigationGate, capabilities: &CapabilitySet) -> Self {
        let active = gate.active();
        let leaf = |view: ViewId| {
            capabilities.get(ViewRegistry::descriptor(view).required).then(|| MenuEntry {
                key: view.as_str(),
                label: ViewRegistry::descriptor(view).label,
                view: Some(view),
                active: view == active,
                children: Vec::new(),
            })
        };

        let sidebar = SIDEBAR
            .iter()
            .filter_map(|item| match item {
                Item::View(view) => leaf(*view),
                Item::Group {
                    key,
                    label,
                    required,
                    children,
                } => {
                    if !capabilities.get(*required) {
                        return None;
                    }
                    let children: Vec<_> = children.iter().filter_map(|v| leaf(*v)).collect();
                    if children.is_empty() {
                        return None;
                    }
                    Some(MenuEntry {
                        key: *key,
                        label: *label,
                        view: None,
                        active: children.iter().any(|c| c.active),
                        children,
                    })
                }
            })
            .collect();

        let account = ACCOUNT.iter().filter_map(|v| leaf(*v)).collect();

        Self {
            active,
            title: ViewRegistry::descriptor(active).title,
            sidebar,
            account,
        }
    }

    /// Every view reachable from this menu.
    pub fn views(&self) -> Vec<ViewId> {
        fn walk(entries: &[MenuEntry], out: &mut Vec<ViewId>) {
            for e in entries {
                out.extend(e.view);
                walk(&e.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.sidebar, &mut out);
        walk(&self.account, &mut out);
        out
    }
}
