use thiserror::Error;

use crate::principal::{Principal, WorkerPrincipal};
use crate::StaffRole;

/// Why a role gate refused an authenticated principal.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// A staff gate was reached without a worker principal attached.
    #[error("worker authentication required")]
    WorkerAuthRequired,

    /// Worker present but not an administrator.
    #[error("administrator role required")]
    AdminRequired,

    /// Worker present but not sales staff.
    #[error("salesperson role required")]
    SalespersonRequired,
}

/// Pass iff the principal is a worker of any role.
pub fn require_worker(principal: &Principal) -> Result<&WorkerPrincipal, GuardError> {
    principal.as_worker().ok_or(GuardError::WorkerAuthRequired)
}

/// Pass iff the principal is a worker with the administrator role.
pub fn require_admin(principal: &Principal) -> Result<&WorkerPrincipal, GuardError> {
    let worker = require_worker(principal)?;
    if worker.role == StaffRole::Administrator {
        Ok(worker)
    } else {
        Err(GuardError::AdminRequired)
    }
}

/// Pass iff the principal is sales staff.
///
/// Administrators pass this gate too. The elevation is one-way:
/// [`require_admin`] never accepts a salesperson.
pub fn require_salesperson(principal: &Principal) -> Result<&WorkerPrincipal, GuardError> {
    let worker = require_worker(principal)?;
    if matches!(worker.role, StaffRole::Salesperson | StaffRole::Administrator) {
        Ok(worker)
    } else {
        Err(GuardError::SalespersonRequired)
    }
}
