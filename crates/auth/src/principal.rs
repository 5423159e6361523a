use serde::{Deserialize, Serialize};

use sportiva_core::{CustomerId, WorkerId};

use crate::StaffRole;

/// Kind discriminator shared by token subjects and resolved principals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Worker,
    Customer,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Worker => "worker",
            PrincipalKind::Customer => "customer",
        }
    }
}

impl core::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff identity projected from a live worker record at resolution time.
///
/// Carries the *current* role and profile fields, not the ones stamped into
/// the token. The password hash never crosses into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerPrincipal {
    pub id: WorkerId,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub role: StaffRole,
}

/// Customer identity projected from a live customer record at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerPrincipal {
    pub id: CustomerId,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
}

/// The authenticated identity attached to a request.
///
/// Exactly one variant per authenticated request; built fresh from the
/// backing record on every request and discarded with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    Worker(WorkerPrincipal),
    Customer(CustomerPrincipal),
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Principal::Worker(_) => PrincipalKind::Worker,
            Principal::Customer(_) => PrincipalKind::Customer,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Principal::Worker(w) => &w.email,
            Principal::Customer(c) => &c.email,
        }
    }

    pub fn given_name(&self) -> &str {
        match self {
            Principal::Worker(w) => &w.given_name,
            Principal::Customer(c) => &c.given_name,
        }
    }

    pub fn as_worker(&self) -> Option<&WorkerPrincipal> {
        match self {
            Principal::Worker(w) => Some(w),
            Principal::Customer(_) => None,
        }
    }

    pub fn as_customer(&self) -> Option<&CustomerPrincipal> {
        match self {
            Principal::Customer(c) => Some(c),
            Principal::Worker(_) => None,
        }
    }
}

impl From<WorkerPrincipal> for Principal {
    fn from(value: WorkerPrincipal) -> Self {
        Principal::Worker(value)
    }
}

impl From<CustomerPrincipal> for Principal {
    fn from(value: CustomerPrincipal) -> Self {
        Principal::Customer(value)
    }
}
