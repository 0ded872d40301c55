use infoco_auth::{Principal, Role};

/// Principal that was signed in when the request arrived.
///
/// Handlers that act on stored data re-check capabilities under the state
/// lock; this is for identity only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    principal: Principal,
}

impl SessionContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn email(&self) -> &str {
        &self.principal.email
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }
}
