//! Account records as the backing store holds them.
//!
//! Credentials live here, not in the auth domain: the password hash is a
//! storage concern, and the principal projections strip it before anything
//! crosses into request context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sportiva_auth::{CustomerPrincipal, StaffRole, WorkerPrincipal};
use sportiva_core::{CustomerId, WorkerId};

// ─────────────────────────────────────────────────────────────────────────────
// Workers
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle status of a worker account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Active,
    Inactive,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Active => "active",
            WorkerStatus::Inactive => "inactive",
        }
    }
}

impl core::fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff account as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: WorkerId,
    pub email: String,
    pub password_hash: String,
    pub given_name: String,
    pub family_name: String,
    pub role: StaffRole,
    pub status: WorkerStatus,
    pub last_access_at: Option<DateTime<Utc>>,
}

impl WorkerRecord {
    pub fn is_active(&self) -> bool {
        self.status == WorkerStatus::Active
    }

    /// Project the request-facing identity. The hash stays behind.
    pub fn principal(&self) -> WorkerPrincipal {
        WorkerPrincipal {
            id: self.id,
            email: self.email.clone(),
            given_name: self.given_name.clone(),
            family_name: self.family_name.clone(),
            role: self.role,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

/// Legacy encodings of the customer active flag.
///
/// Imported rows carry the flag in whichever shape the old system wrote: a
/// real boolean, a 0/1 integer, or a "0"/"1" string. Untagged serde keeps
/// every shape readable, and [`CustomerRecord::is_active`] is the only place
/// that interprets them.
// TODO: collapse to a plain bool once the legacy customer dump is re-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActiveFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl ActiveFlag {
    pub fn is_truthy(&self) -> bool {
        match self {
            ActiveFlag::Bool(b) => *b,
            ActiveFlag::Int(n) => *n == 1,
            ActiveFlag::Text(s) => s == "1",
        }
    }
}

/// Customer account as stored. Aliases match the legacy export columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub email: String,
    pub password_hash: String,
    pub given_name: String,
    pub family_name: String,
    #[serde(alias = "activo")]
    pub active: ActiveFlag,

    /// Secondary legacy status column; `"Active"` also marks the row live.
    #[serde(default, alias = "estado")]
    pub status: Option<String>,

    /// Storefront back-office flag, checked against the live record on every
    /// gated request, never against a context snapshot.
    #[serde(default)]
    pub admin: bool,
}

impl CustomerRecord {
    /// The one predicate over every legacy encoding: the account is active
    /// when any flag says so.
    pub fn is_active(&self) -> bool {
        self.active.is_truthy() || self.status.as_deref() == Some("Active")
    }

    pub fn principal(&self) -> CustomerPrincipal {
        CustomerPrincipal {
            id: self.id,
            email: self.email.clone(),
            given_name: self.given_name.clone(),
            family_name: self.family_name.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
