//! Process wiring: configuration, shared services, first-run seeding.
//!
//! Everything the routers need is constructed here exactly once and
//! injected; nothing reads the environment or builds a store after
//! startup.

use std::sync::Arc;

use chrono::Duration;

use sportiva_accounts::{
    CustomerStore, InMemoryCustomerStore, InMemoryWorkerStore, WorkerRecord, WorkerStatus,
    WorkerStore,
};
use sportiva_auth::{hash_password, Hs256TokenCodec, StaffRole, TokenCodec};
use sportiva_core::WorkerId;

use crate::resolver::PrincipalResolver;

const DEFAULT_TOKEN_TTL_SECS: i64 = 28_800;

/// Runtime configuration, resolved from the environment by `main` and
/// handed in whole to [`build_app`](crate::app::build_app).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub seed_admin_password: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Missing values fall back to insecure development defaults, loudly.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev secret");
            "dev-secret".to_string()
        });

        let token_ttl = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::seconds)
            .unwrap_or_else(|| Duration::seconds(DEFAULT_TOKEN_TTL_SECS));

        let seed_admin_password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("SEED_ADMIN_PASSWORD not set; using insecure dev password");
            "admin-dev-password".to_string()
        });

        Self {
            jwt_secret,
            token_ttl,
            seed_admin_password,
        }
    }
}

/// Shared services behind every route.
pub struct AppServices {
    pub codec: Arc<dyn TokenCodec>,
    pub workers: Arc<dyn WorkerStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub resolver: Arc<PrincipalResolver>,
    pub token_ttl: Duration,
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let codec: Arc<dyn TokenCodec> = Arc::new(Hs256TokenCodec::new(config.jwt_secret.as_bytes()));
    let workers: Arc<dyn WorkerStore> = Arc::new(InMemoryWorkerStore::new());
    let customers: Arc<dyn CustomerStore> = Arc::new(InMemoryCustomerStore::new());
    let resolver = Arc::new(PrincipalResolver::new(workers.clone(), customers.clone()));

    AppServices {
        codec,
        workers,
        customers,
        resolver,
        token_ttl: config.token_ttl,
    }
}

/// Seed the first administrator when the worker directory is empty, so a
/// fresh deployment has someone who can log in and create the rest.
///
/// Failures are logged and swallowed; a seeding problem should not stop
/// the process from serving the public routes.
pub async fn ensure_seed_admin(services: &AppServices, password: &str) {
    match services.workers.list().await {
        Ok(records) if records.is_empty() => {}
        Ok(_) => return,
        Err(err) => {
            tracing::error!(error = %err, "could not inspect worker directory for seeding");
            return;
        }
    }

    let password_hash = match hash_password(password) {
        Ok(phc) => phc,
        Err(err) => {
            tracing::error!(error = %err, "could not hash the seed admin password");
            return;
        }
    };

    let record = WorkerRecord {
        id: WorkerId::new(),
        email: "admin@sportiva.com".into(),
        password_hash,
        given_name: "Admin".into(),
        family_name: "Sportiva".into(),
        role: StaffRole::Administrator,
        status: WorkerStatus::Active,
        last_access_at: None,
    };

    match services.workers.insert(record).await {
        Ok(()) => tracing::info!("seeded initial administrator account"),
        Err(err) => tracing::error!(error = %err, "could not seed the administrator account"),
    }
}
