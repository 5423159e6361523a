//! In-memory stores for tests and development.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use sportiva_auth::StaffRole;
use sportiva_core::{email, CustomerId, WorkerId};

use crate::records::{CustomerRecord, WorkerRecord, WorkerStatus};
use crate::store::{CustomerStore, StoreError, WorkerStore};

fn poisoned() -> StoreError {
    StoreError::Unavailable("store lock poisoned".into())
}

/// In-memory worker store.
#[derive(Debug, Default)]
pub struct InMemoryWorkerStore {
    inner: RwLock<HashMap<WorkerId, WorkerRecord>>,
}

impl InMemoryWorkerStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl WorkerStore for InMemoryWorkerStore {
    async fn find_by_id(&self, id: WorkerId) -> Result<Option<WorkerRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn find_active_by_email(
        &self,
        email_raw: &str,
    ) -> Result<Option<WorkerRecord>, StoreError> {
        let needle = email::normalize(email_raw);
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map
            .values()
            .find(|r| r.status == WorkerStatus::Active && email::normalize(&r.email) == needle)
            .cloned())
    }

    async fn email_exists(&self, email_raw: &str) -> Result<bool, StoreError> {
        let needle = email::normalize(email_raw);
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().any(|r| email::normalize(&r.email) == needle))
    }

    async fn insert(&self, record: WorkerRecord) -> Result<(), StoreError> {
        let needle = email::normalize(&record.email);
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.values().any(|r| email::normalize(&r.email) == needle) {
            return Err(StoreError::DuplicateEmail);
        }
        map.insert(record.id, record);
        Ok(())
    }

    async fn record_last_access(
        &self,
        id: WorkerId,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let record = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        record.last_access_at = Some(at);
        Ok(())
    }

    async fn update_status(&self, id: WorkerId, status: WorkerStatus) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let record = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        record.status = status;
        Ok(())
    }

    async fn update_role(&self, id: WorkerId, role: StaffRole) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let record = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        record.role = role;
        Ok(())
    }

    async fn update_password(&self, id: WorkerId, password_hash: String) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let record = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        record.password_hash = password_hash;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<WorkerRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }
}

/// In-memory customer store.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    inner: RwLock<HashMap<CustomerId, CustomerRecord>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<CustomerRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn find_by_email(&self, email_raw: &str) -> Result<Option<CustomerRecord>, StoreError> {
        let needle = email::normalize(email_raw);
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map
            .values()
            .find(|r| email::normalize(&r.email) == needle)
            .cloned())
    }

    async fn email_exists(&self, email_raw: &str) -> Result<bool, StoreError> {
        let needle = email::normalize(email_raw);
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().any(|r| email::normalize(&r.email) == needle))
    }

    async fn insert(&self, record: CustomerRecord) -> Result<(), StoreError> {
        let needle = email::normalize(&record.email);
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.values().any(|r| email::normalize(&r.email) == needle) {
            return Err(StoreError::DuplicateEmail);
        }
        map.insert(record.id, record);
        Ok(())
    }

    async fn update_password(
        &self,
        id: CustomerId,
        password_hash: String,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let record = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        record.password_hash = password_hash;
        Ok(())
    }

    async fn set_admin(&self, id: CustomerId, admin: bool) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let record = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        record.admin = admin;
        Ok(())
    }
}
