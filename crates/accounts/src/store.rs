//! Store interfaces for account records.
//!
//! The auth chain performs read-only lookups on every request; the handful
//! of writes (registration, the last-access stamp, admin mutations,
//! password change) are trusted-caller operations behind role gates.

use chrono::{DateTime, Utc};
use thiserror::Error;

use sportiva_auth::StaffRole;
use sportiva_core::{CustomerId, WorkerId};

use crate::records::{CustomerRecord, WorkerRecord, WorkerStatus};

/// Backing-store failure. Callers surface these as infrastructure faults;
/// none of them ever means "wrong credentials".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("no record for id {0}")]
    MissingRecord(String),

    #[error("email already registered")]
    DuplicateEmail,
}

/// Staff account store.
///
/// Lookups return `Ok(None)` for absent records; `Err` is reserved for the
/// store itself failing.
#[async_trait::async_trait]
pub trait WorkerStore: Send + Sync {
    async fn find_by_id(&self, id: WorkerId) -> Result<Option<WorkerRecord>, StoreError>;

    /// Case-insensitive email lookup that only surfaces Active workers, so
    /// login code cannot authenticate a disabled account by accident.
    async fn find_active_by_email(&self, email: &str)
        -> Result<Option<WorkerRecord>, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert a new worker. Fails `DuplicateEmail` on a normalized-email
    /// collision.
    async fn insert(&self, record: WorkerRecord) -> Result<(), StoreError>;

    /// Stamp the last successful login. Called fire-and-forget from the
    /// login flow only, never from per-request verification.
    async fn record_last_access(&self, id: WorkerId, at: DateTime<Utc>)
        -> Result<(), StoreError>;

    async fn update_status(&self, id: WorkerId, status: WorkerStatus)
        -> Result<(), StoreError>;

    async fn update_role(&self, id: WorkerId, role: StaffRole) -> Result<(), StoreError>;

    async fn update_password(&self, id: WorkerId, password_hash: String)
        -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<WorkerRecord>, StoreError>;
}

/// Customer account store.
///
/// Unlike [`WorkerStore::find_active_by_email`], the email lookup here
/// returns inactive rows too: customer login distinguishes a disabled
/// account from a wrong password.
#[async_trait::async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<CustomerRecord>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerRecord>, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert a new customer. Fails `DuplicateEmail` on a normalized-email
    /// collision.
    async fn insert(&self, record: CustomerRecord) -> Result<(), StoreError>;

    async fn update_password(&self, id: CustomerId, password_hash: String)
        -> Result<(), StoreError>;

    /// Grant or revoke the storefront admin flag. The admin gate re-reads
    /// the record on every request, so this takes effect mid-session.
    async fn set_admin(&self, id: CustomerId, admin: bool) -> Result<(), StoreError>;
}
