//! `infoco-auth`: identity, roles and capabilities.
//!
//! No HTTP or storage in here: durable
//! session state sits behind [`SessionVault`], credentials behind
//! [`CredentialSource`].

pub mod authorize;
pub mod credentials;
pub mod matrix;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod session;

pub use authorize::{authorize, authorize_gated, AuthzError, Gated};
pub use credentials::{AccountSummary, CredentialDraft, CredentialRecord, CredentialSource};
pub use matrix::{CapabilityMatrix, PermissionError};
pub use permissions::{Capability, CapabilitySet, UnknownCapability};
pub use principal::Principal;
pub use roles::{Role, UnknownRole};
pub use session::{AuthError, SessionProvider, SessionVault};
