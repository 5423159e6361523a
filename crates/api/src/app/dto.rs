use serde::Deserialize;

use sportiva_accounts::WorkerRecord;
use sportiva_accounts::WorkerStatus;
use sportiva_auth::{Principal, StaffRole};

/// Applies to registration, staff creation, and password change alike.
pub const MIN_PASSWORD_LEN: usize = 8;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterCustomerRequest {
    pub email: String,
    pub password: String,
    pub given_name: String,
    pub family_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkerRequest {
    pub email: String,
    pub password: String,
    pub given_name: String,
    pub family_name: String,
    pub role: StaffRole,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWorkerStatusRequest {
    pub status: WorkerStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWorkerRoleRequest {
    pub role: StaffRole,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Directory view of a worker. The password hash never leaves the store
/// layer.
pub fn worker_to_json(record: &WorkerRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id.to_string(),
        "email": record.email,
        "given_name": record.given_name,
        "family_name": record.family_name,
        "role": record.role.as_str(),
        "status": record.status.as_str(),
        "last_access_at": record.last_access_at.map(|at| at.to_rfc3339()),
    })
}

pub fn principal_to_json(principal: &Principal) -> serde_json::Value {
    match principal {
        Principal::Worker(worker) => serde_json::json!({
            "kind": "worker",
            "id": worker.id.to_string(),
            "email": worker.email,
            "given_name": worker.given_name,
            "family_name": worker.family_name,
            "role": worker.role.as_str(),
        }),
        Principal::Customer(customer) => serde_json::json!({
            "kind": "customer",
            "id": customer.id.to_string(),
            "email": customer.email,
            "given_name": customer.given_name,
            "family_name": customer.family_name,
        }),
    }
}

/// Successful login/registration payload: the signed token plus the
/// principal it will resolve to.
pub fn token_response(token: String, principal: &Principal) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "token": token,
        "principal": principal_to_json(principal),
    })
}
