//! Principal resolution: verified claims in, live principal out.

use std::sync::Arc;

use thiserror::Error;

use sportiva_accounts::{CustomerStore, StoreError, WorkerStore};
use sportiva_auth::{AccessClaims, Principal, TokenSubject};
use sportiva_core::CustomerId;

/// Why a verified token could not be turned into a principal.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("worker account not found")]
    WorkerNotFound,

    #[error("customer account not found")]
    CustomerNotFound,

    #[error("account is disabled")]
    AccountDisabled,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Turns verified claims into a live principal backed by the current
/// account record.
///
/// This runs on every authenticated request, so it is strictly read-only
/// and idempotent: resolving the same claims twice against unchanged
/// records yields the same principal. The role and names come from the
/// record, not from whatever was stamped into the token at login.
pub struct PrincipalResolver {
    workers: Arc<dyn WorkerStore>,
    customers: Arc<dyn CustomerStore>,
}

impl PrincipalResolver {
    pub fn new(workers: Arc<dyn WorkerStore>, customers: Arc<dyn CustomerStore>) -> Self {
        Self { workers, customers }
    }

    pub async fn resolve(&self, claims: &AccessClaims) -> Result<Principal, ResolveError> {
        match claims.subject {
            TokenSubject::Worker { worker_id, .. } => {
                let record = self
                    .workers
                    .find_by_id(worker_id)
                    .await?
                    .ok_or(ResolveError::WorkerNotFound)?;
                if !record.is_active() {
                    return Err(ResolveError::AccountDisabled);
                }
                Ok(Principal::Worker(record.principal()))
            }
            TokenSubject::Customer { customer_id } => {
                let record = self
                    .customers
                    .find_by_id(customer_id)
                    .await?
                    .ok_or(ResolveError::CustomerNotFound)?;
                if !record.is_active() {
                    return Err(ResolveError::AccountDisabled);
                }
                Ok(Principal::Customer(record.principal()))
            }
        }
    }

    /// Live admin-flag check for the customer back-office gate.
    ///
    /// Reads the record fresh on every call; a missing record simply does
    /// not carry the flag.
    pub async fn customer_admin_flag(&self, id: CustomerId) -> Result<bool, StoreError> {
        Ok(self
            .customers
            .find_by_id(id)
            .await?
            .is_some_and(|record| record.admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sportiva_accounts::{
        ActiveFlag, CustomerRecord, InMemoryCustomerStore, InMemoryWorkerStore, WorkerRecord,
        WorkerStatus,
    };
    use sportiva_auth::StaffRole;
    use sportiva_core::WorkerId;

    fn resolver_with(
        workers: InMemoryWorkerStore,
        customers: InMemoryCustomerStore,
    ) -> PrincipalResolver {
        PrincipalResolver::new(Arc::new(workers), Arc::new(customers))
    }

    fn worker_record(status: WorkerStatus) -> WorkerRecord {
        WorkerRecord {
            id: WorkerId::new(),
            email: "ana@sportiva.com".into(),
            password_hash: "$argon2id$stub".into(),
            given_name: "Ana".into(),
            family_name: "Reyes".into(),
            role: StaffRole::Salesperson,
            status,
            last_access_at: None,
        }
    }

    fn customer_record(active: ActiveFlag) -> CustomerRecord {
        CustomerRecord {
            id: CustomerId::new(),
            email: "maria@example.test".into(),
            password_hash: "$argon2id$stub".into(),
            given_name: "Maria".into(),
            family_name: "Lopez".into(),
            active,
            status: None,
            admin: false,
        }
    }

    fn worker_claims(record: &WorkerRecord) -> AccessClaims {
        AccessClaims::issue_now(
            TokenSubject::Worker {
                worker_id: record.id,
                role: record.role,
            },
            record.email.clone(),
            record.given_name.clone(),
            Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn active_worker_resolves_to_worker_principal() {
        let workers = InMemoryWorkerStore::new();
        let record = worker_record(WorkerStatus::Active);
        let claims = worker_claims(&record);
        workers.insert(record.clone()).await.unwrap();
        let resolver = resolver_with(workers, InMemoryCustomerStore::new());

        let principal = resolver.resolve(&claims).await.unwrap();
        let worker = principal.as_worker().unwrap();
        assert_eq!(worker.id, record.id);
        assert_eq!(worker.role, StaffRole::Salesperson);
    }

    #[tokio::test]
    async fn role_comes_from_the_record_not_the_token() {
        let workers = InMemoryWorkerStore::new();
        let record = worker_record(WorkerStatus::Active);
        let id = record.id;
        let claims = worker_claims(&record);
        workers.insert(record).await.unwrap();
        // Promote after the token was minted.
        workers
            .update_role(id, StaffRole::Administrator)
            .await
            .unwrap();
        let resolver = resolver_with(workers, InMemoryCustomerStore::new());

        let principal = resolver.resolve(&claims).await.unwrap();
        assert_eq!(
            principal.as_worker().unwrap().role,
            StaffRole::Administrator
        );
    }

    #[tokio::test]
    async fn unknown_worker_id_is_worker_not_found() {
        let record = worker_record(WorkerStatus::Active);
        let claims = worker_claims(&record);
        // The record never lands in the store.
        let resolver = resolver_with(InMemoryWorkerStore::new(), InMemoryCustomerStore::new());

        let err = resolver.resolve(&claims).await.unwrap_err();
        assert!(matches!(err, ResolveError::WorkerNotFound));
    }

    #[tokio::test]
    async fn inactive_worker_is_account_disabled() {
        let workers = InMemoryWorkerStore::new();
        let record = worker_record(WorkerStatus::Inactive);
        let claims = worker_claims(&record);
        workers.insert(record).await.unwrap();
        let resolver = resolver_with(workers, InMemoryCustomerStore::new());

        let err = resolver.resolve(&claims).await.unwrap_err();
        assert!(matches!(err, ResolveError::AccountDisabled));
    }

    #[tokio::test]
    async fn legacy_string_flag_customer_resolves() {
        let customers = InMemoryCustomerStore::new();
        let record = customer_record(ActiveFlag::Text("1".into()));
        let claims = AccessClaims::issue_now(
            TokenSubject::Customer {
                customer_id: record.id,
            },
            record.email.clone(),
            record.given_name.clone(),
            Duration::hours(1),
        );
        customers.insert(record.clone()).await.unwrap();
        let resolver = resolver_with(InMemoryWorkerStore::new(), customers);

        let principal = resolver.resolve(&claims).await.unwrap();
        assert_eq!(principal.as_customer().unwrap().id, record.id);
    }

    #[tokio::test]
    async fn inactive_customer_is_account_disabled_not_not_found() {
        let customers = InMemoryCustomerStore::new();
        let record = customer_record(ActiveFlag::Int(0));
        let claims = AccessClaims::issue_now(
            TokenSubject::Customer {
                customer_id: record.id,
            },
            record.email.clone(),
            record.given_name.clone(),
            Duration::hours(1),
        );
        customers.insert(record).await.unwrap();
        let resolver = resolver_with(InMemoryWorkerStore::new(), customers);

        let err = resolver.resolve(&claims).await.unwrap_err();
        assert!(matches!(err, ResolveError::AccountDisabled));
    }

    #[tokio::test]
    async fn resolving_twice_yields_the_same_principal() {
        let workers = InMemoryWorkerStore::new();
        let record = worker_record(WorkerStatus::Active);
        let claims = worker_claims(&record);
        workers.insert(record).await.unwrap();
        let resolver = resolver_with(workers, InMemoryCustomerStore::new());

        let first = resolver.resolve(&claims).await.unwrap();
        let second = resolver.resolve(&claims).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn admin_flag_check_reads_the_live_record() {
        let customers = InMemoryCustomerStore::new();
        let record = customer_record(ActiveFlag::Bool(true));
        let id = record.id;
        customers.insert(record).await.unwrap();
        let customers = Arc::new(customers);
        let resolver =
            PrincipalResolver::new(Arc::new(InMemoryWorkerStore::new()), customers.clone());

        assert!(!resolver.customer_admin_flag(id).await.unwrap());
        customers.set_admin(id, true).await.unwrap();
        assert!(resolver.customer_admin_flag(id).await.unwrap());
        // Unknown ids do not carry the flag.
        assert!(!resolver.customer_admin_flag(CustomerId::new()).await.unwrap());
    }
}
