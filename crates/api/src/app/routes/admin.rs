//! Worker directory administration.
//!
//! Every route here sits behind the administrator gate; handlers assume a
//! vetted caller and only validate the payload.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use sportiva_accounts::{StoreError, WorkerRecord, WorkerStatus};
use sportiva_auth::hash_password;
use sportiva_core::{email, WorkerId};

use crate::app::{dto, errors, services::AppServices};

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /admin/workers
pub async fn list_workers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let mut records = match services.workers.list().await {
        Ok(records) => records,
        Err(err) => return store_internal(err, "worker list failed"),
    };
    records.sort_by(|a, b| a.email.cmp(&b.email));

    let items: Vec<serde_json::Value> = records.iter().map(dto::worker_to_json).collect();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "workers": items })),
    )
        .into_response()
}

/// POST /admin/workers
pub async fn create_worker(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateWorkerRequest>,
) -> axum::response::Response {
    let normalized_email = match email::validate(&body.email) {
        Ok(normalized) => normalized,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "a valid email is required",
            )
        }
    };
    if body.password.len() < dto::MIN_PASSWORD_LEN {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "ValidationError",
            "password must be at least 8 characters",
        );
    }
    let given_name = body.given_name.trim();
    let family_name = body.family_name.trim();
    if given_name.is_empty() || family_name.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "ValidationError",
            "given and family name are required",
        );
    }

    match services.workers.email_exists(&normalized_email).await {
        Ok(false) => {}
        Ok(true) => {
            return errors::json_error(
                StatusCode::CONFLICT,
                "EmailTaken",
                "email already registered",
            )
        }
        Err(err) => return store_internal(err, "worker email check failed"),
    }

    let password_hash = match hash_password(&body.password) {
        Ok(phc) => phc,
        Err(err) => return store_internal(err, "password hashing failed"),
    };

    let record = WorkerRecord {
        id: WorkerId::new(),
        email: normalized_email,
        password_hash,
        given_name: given_name.to_string(),
        family_name: family_name.to_string(),
        role: body.role,
        // New staff start active; deactivation is an explicit admin action.
        status: WorkerStatus::Active,
        last_access_at: None,
    };

    match services.workers.insert(record.clone()).await {
        Ok(()) => {}
        Err(StoreError::DuplicateEmail) => {
            return errors::json_error(
                StatusCode::CONFLICT,
                "EmailTaken",
                "email already registered",
            )
        }
        Err(err) => return store_internal(err, "worker insert failed"),
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "worker": dto::worker_to_json(&record),
        })),
    )
        .into_response()
}

/// PATCH /admin/workers/:id/status
pub async fn update_worker_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateWorkerStatusRequest>,
) -> axum::response::Response {
    let worker_id = match parse_worker_id(&id) {
        Ok(worker_id) => worker_id,
        Err(response) => return response,
    };

    match services.workers.update_status(worker_id, body.status).await {
        Ok(()) => mutation_ok(worker_id),
        Err(StoreError::MissingRecord(_)) => not_found(),
        Err(err) => store_internal(err, "worker status update failed"),
    }
}

/// PATCH /admin/workers/:id/role
pub async fn update_worker_role(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateWorkerRoleRequest>,
) -> axum::response::Response {
    let worker_id = match parse_worker_id(&id) {
        Ok(worker_id) => worker_id,
        Err(response) => return response,
    };

    match services.workers.update_role(worker_id, body.role).await {
        Ok(()) => mutation_ok(worker_id),
        Err(StoreError::MissingRecord(_)) => not_found(),
        Err(err) => store_internal(err, "worker role update failed"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn parse_worker_id(raw: &str) -> Result<WorkerId, axum::response::Response> {
    raw.parse::<WorkerId>().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "InvalidId", "invalid worker id")
    })
}

fn mutation_ok(id: WorkerId) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "id": id.to_string() })),
    )
        .into_response()
}

fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "NotFound", "worker not found")
}

fn store_internal(err: impl std::fmt::Display, what: &'static str) -> axum::response::Response {
    tracing::error!(error = %err, "{what}");
    errors::json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "InternalError",
        "request failed unexpectedly",
    )
}
