use sportiva_auth::{CustomerPrincipal, Principal, PrincipalKind, WorkerPrincipal};

/// Authenticated identity for a request.
///
/// Built once by the auth middleware and attached as a request extension.
/// This is immutable: handlers and role gates read it, nothing downstream
/// mutates it or re-resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    principal: Principal,
}

impl AuthContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn kind(&self) -> PrincipalKind {
        self.principal.kind()
    }

    pub fn worker(&self) -> Option<&WorkerPrincipal> {
        self.principal.as_worker()
    }

    pub fn customer(&self) -> Option<&CustomerPrincipal> {
        self.principal.as_customer()
    }
}

/// Identity attachment for optional-auth routes.
///
/// `None` means the request proceeds anonymously; the route itself decides
/// what an anonymous caller gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionalAuth(pub Option<AuthContext>);

impl OptionalAuth {
    pub fn customer(&self) -> Option<&CustomerPrincipal> {
        self.0.as_ref().and_then(AuthContext::customer)
    }
}
