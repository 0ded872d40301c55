use thiserror::Error;

use crate::{Capability, CapabilityMatrix, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' lacks '{capability}'")]
    Forbidden { role: Role, capability: Capability },
}

/// Something that can only be reached with one capability (a view, a
/// collection, an action).
pub trait Gated {
    fn required_capability(&self) -> Capability;
}

/// Pure policy check against the current matrix.
///
/// - No IO
/// - No panics
pub fn authorize(
    role: Role,
    required: Capability,
    matrix: &CapabilityMatrix,
) -> Result<(), AuthzError> {
    if matrix.can(role, required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role,
            capability: required,
        })
    }
}

pub fn authorize_gated<G: Gated + ?Sized>(
    role: Role,
    target: &G,
    matrix: &CapabilityMatrix,
) -> Result<(), AuthzError> {
    authorize(role, target.required_capability(), matrix)
}
