//! `infoco-navigation`: which views a role may open, and what happens when
//! it may not.
//!
//! Denial is silent: an unauthorized selection lands on the default view.

pub mod gate;
pub mod menu;
pub mod view;

pub use gate::{GateState, NavigationGate};
pub use menu::{Menu, MenuEntry};
pub use view::{UnknownView, ViewDescriptor, ViewId, ViewRegistry};
