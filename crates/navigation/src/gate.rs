//! Navigation authorization gate.

use serde::Serialize;

use infoco_auth::{CapabilitySet, Gated};

use crate::{ViewId, ViewRegistry};

/// Where the current selection stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GateState {
    Requested { view: ViewId },
    Authorized { view: ViewId },
    /// `requested` was denied; `view` is the fallback actually shown.
    Redirected { requested: ViewId, view: ViewId },
}

impl GateState {
    /// View that is (or is about to be) shown.
    pub fn view(self) -> ViewId {
        match self {
            GateState::Requested { view }
            | GateState::Authorized { view }
            | GateState::Redirected { view, .. } => view,
        }
    }
}

/// Tracks the active view and re-checks it against the current capabilities.
///
/// Authorization is continuous: callers re-run [`NavigationGate::revalidate`]
/// whenever the capabilities of the active role may have changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationGate {
    state: GateState,
}

impl NavigationGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Authorized {
                view: ViewRegistry::DEFAULT,
            },
        }
    }

    /// Select `view`; lands on the default view if it is not permitted.
    pub fn request(&mut self, view: ViewId, capabilities: &CapabilitySet) -> GateState {
        self.state = GateState::Requested { view };
        self.resolve(capabilities)
    }

    /// Re-check the currently selected view.
    pub fn revalidate(&mut self, capabilities: &CapabilitySet) -> GateState {
        let view = self.state.view();
        self.request(view, capabilities)
    }

    /// Back to the default view (e.g. after logout).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn active(&self) -> ViewId {
        self.state.view()
    }

    /// The default view is the landing page and is always reachable.
    pub fn permits(view: ViewId, capabilities: &CapabilitySet) -> bool {
        view == ViewRegistry::DEFAULT || capabilities.get(view.required_capability())
    }

    fn resolve(&mut self, capabilities: &CapabilitySet) -> GateState {
        let GateState::Requested { view } = self.state else {
            return self.state;
        };

        self.state = if Self::permits(view, capabilities) {
            GateState::Authorized { view }
        } else {
            tracing::debug!(requested = %view, fallback = %ViewRegistry::DEFAULT, "view denied, redirecting");
            GateState::Redirected {
                requested: view,
                view: ViewRegistry::DEFAULT,
            }
        };
        self.state
    }
}

impl Default for NavigationGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use infoco_auth::{Capability, CapabilityMatrix, Role};
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn support_asking_for_users_lands_on_dashboard() {
        let m = CapabilityMatrix::default();
        let mut gate = NavigationGate::new();

        let state = gate.request(ViewId::Users, &m.capabilities_for(Role::Support));
        assert_eq!(
            state,
            GateState::Redirected {
                requested: ViewId::Users,
                view: ViewId::Dashboard
            }
        );
        assert_eq!(gate.active(), ViewId::Dashboard);
    }

    #[test]
    fn revoking_a_capability_evicts_the_active_view() {
        let mut m = CapabilityMatrix::default();
        let mut gate = NavigationGate::new();
        gate.request(ViewId::Hr, &m.capabilities_for(Role::Coordinator));
        assert_eq!(gate.active(), ViewId::Hr);

        m.set_capability(Role::Coordinator, Capability::ManageHr, false)
            .unwrap();
        gate.revalidate(&m.capabilities_for(Role::Coordinator));
        assert_eq!(gate.active(), ViewId::Dashboard);
    }

    #[test]
    fn granting_a_capability_opens_the_view_without_relogin() {
        let mut m = CapabilityMatrix::default();
        let mut gate = NavigationGate::new();
        gate.request(ViewId::Finance, &m.capabilities_for(Role::Coordinator));
        assert_eq!(gate.active(), ViewId::Dashboard);

        m.set_capability(Role::Coordinator, Capability::ManageFinance, true)
            .unwrap();
        gate.request(ViewId::Finance, &m.capabilities_for(Role::Coordinator));
        assert_eq!(gate.state(), GateState::Authorized { view: ViewId::Finance });
    }

    #[test]
    fn state_serializes_with_a_tag() {
        let json = serde_json::to_value(GateState::Authorized { view: ViewId::Tasks }).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "authorized", "view": "tasks" }));
    }

    fn view() -> impl Strategy<Value = ViewId> {
        prop::sample::select(ViewId::ALL.to_vec())
    }

    fn capabilities() -> impl Strategy<Value = CapabilitySet> {
        prop::collection::vec(any::<bool>(), Capability::COUNT).prop_map(|bits| {
            CapabilitySet::from_granted(
                Capability::ALL
                    .into_iter()
                    .zip(bits)
                    .filter(|(_, on)| *on)
                    .map(|(c, _)| c),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

        #[test]
        fn never_lands_on_an_unauthorized_view(
            caps in capabilities(),
            history in prop::collection::vec(view(), 1..8),
        ) {
            let mut gate = NavigationGate::new();
            for v in history {
                let state = gate.request(v, &caps);
                let active = state.view();

                prop_assert!(NavigationGate::permits(active, &caps));
                if !caps.get(v.required_capability()) {
                    prop_assert_eq!(active, ViewRegistry::DEFAULT);
                }
            }
        }
    }
}
