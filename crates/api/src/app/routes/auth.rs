//! Login, registration, and the authenticated self-service endpoints.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use sportiva_accounts::{ActiveFlag, CustomerRecord};
use sportiva_auth::{hash_password, verify_password, AccessClaims, Principal, TokenSubject};
use sportiva_core::{email, CustomerId};

use crate::app::dto::{self, MIN_PASSWORD_LEN};
use crate::app::{errors, services::AppServices};
use crate::context::AuthContext;

/// POST /auth/worker/login
///
/// A missing account and a wrong password are the same answer on the wire;
/// the lookup already skips disabled workers, so those read as bad
/// credentials too rather than advertising the account's state.
pub async fn worker_login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let record = match services.workers.find_active_by_email(&body.email).await {
        Ok(Some(record)) => record,
        Ok(None) => return invalid_credentials(),
        Err(err) => return auth_internal(err, "worker login lookup failed"),
    };

    match verify_password(&body.password, &record.password_hash) {
        Ok(true) => {}
        Ok(false) => return invalid_credentials(),
        Err(err) => return auth_internal(err, "password verification failed"),
    }

    let claims = AccessClaims::issue_now(
        TokenSubject::Worker {
            worker_id: record.id,
            role: record.role,
        },
        record.email.clone(),
        record.given_name.clone(),
        services.token_ttl,
    );
    let token = match services.codec.issue(&claims) {
        Ok(token) => token,
        Err(err) => return auth_internal(err, "token issue failed"),
    };

    // Fire-and-forget: the login response does not wait on the stamp, and
    // a failed stamp must not fail the login.
    let workers = services.workers.clone();
    let worker_id = record.id;
    tokio::spawn(async move {
        if let Err(err) = workers.record_last_access(worker_id, Utc::now()).await {
            tracing::warn!(error = %err, %worker_id, "last-access stamp failed");
        }
    });

    let principal = Principal::Worker(record.principal());
    (
        StatusCode::OK,
        Json(dto::token_response(token, &principal)),
    )
        .into_response()
}

/// POST /auth/customer/login
///
/// Unlike workers, a disabled customer account is told so, but only after
/// the password checks out; wrong-password callers learn nothing about the
/// account's state.
pub async fn customer_login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let record = match services.customers.find_by_email(&body.email).await {
        Ok(Some(record)) => record,
        Ok(None) => return invalid_credentials(),
        Err(err) => return auth_internal(err, "customer login lookup failed"),
    };

    match verify_password(&body.password, &record.password_hash) {
        Ok(true) => {}
        Ok(false) => return invalid_credentials(),
        Err(err) => return auth_internal(err, "password verification failed"),
    }

    if !record.is_active() {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "AccountDisabled",
            "account is disabled",
        );
    }

    let claims = AccessClaims::issue_now(
        TokenSubject::Customer {
            customer_id: record.id,
        },
        record.email.clone(),
        record.given_name.clone(),
        services.token_ttl,
    );
    let token = match services.codec.issue(&claims) {
        Ok(token) => token,
        Err(err) => return auth_internal(err, "token issue failed"),
    };

    let principal = Principal::Customer(record.principal());
    (
        StatusCode::OK,
        Json(dto::token_response(token, &principal)),
    )
        .into_response()
}

/// POST /auth/customer/register
pub async fn customer_register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterCustomerRequest>,
) -> axum::response::Response {
    let normalized_email = match email::validate(&body.email) {
        Ok(normalized) => normalized,
        Err(_) => return validation("a valid email is required"),
    };
    if body.password.len() < MIN_PASSWORD_LEN {
        return validation("password must be at least 8 characters");
    }
    let given_name = body.given_name.trim();
    let family_name = body.family_name.trim();
    if given_name.is_empty() || family_name.is_empty() {
        return validation("given and family name are required");
    }

    match services.customers.email_exists(&normalized_email).await {
        Ok(false) => {}
        Ok(true) => return email_taken(),
        Err(err) => return auth_internal(err, "registration lookup failed"),
    }

    let password_hash = match hash_password(&body.password) {
        Ok(phc) => phc,
        Err(err) => return auth_internal(err, "password hashing failed"),
    };

    let record = CustomerRecord {
        id: CustomerId::new(),
        email: normalized_email,
        password_hash,
        given_name: given_name.to_string(),
        family_name: family_name.to_string(),
        active: ActiveFlag::Bool(true),
        status: None,
        admin: false,
    };

    match services.customers.insert(record.clone()).await {
        Ok(()) => {}
        Err(sportiva_accounts::StoreError::DuplicateEmail) => return email_taken(),
        Err(err) => return auth_internal(err, "registration insert failed"),
    }

    let claims = AccessClaims::issue_now(
        TokenSubject::Customer {
            customer_id: record.id,
        },
        record.email.clone(),
        record.given_name.clone(),
        services.token_ttl,
    );
    let token = match services.codec.issue(&claims) {
        Ok(token) => token,
        Err(err) => return auth_internal(err, "token issue failed"),
    };

    let principal = Principal::Customer(record.principal());
    (
        StatusCode::CREATED,
        Json(dto::token_response(token, &principal)),
    )
        .into_response()
}

/// GET /auth/profile
///
/// Works for both principal kinds; the payload says which one it is.
pub async fn profile(Extension(context): Extension<AuthContext>) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "principal": dto::principal_to_json(context.principal()),
        })),
    )
        .into_response()
}

/// POST /auth/password
///
/// Re-proves the current password before accepting the new one, for both
/// principal kinds.
pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(context): Extension<AuthContext>,
    Json(body): Json<dto::ChangePasswordRequest>,
) -> axum::response::Response {
    if body.new_password.len() < MIN_PASSWORD_LEN {
        return validation("password must be at least 8 characters");
    }

    let current_hash = match context.principal() {
        Principal::Worker(worker) => match services.workers.find_by_id(worker.id).await {
            Ok(Some(record)) => record.password_hash,
            Ok(None) => return errors::AuthFailure::WorkerNotFound.into_response(),
            Err(err) => return auth_internal(err, "password change lookup failed"),
        },
        Principal::Customer(customer) => match services.customers.find_by_id(customer.id).await {
            Ok(Some(record)) => record.password_hash,
            Ok(None) => return errors::AuthFailure::ClientNotFound.into_response(),
            Err(err) => return auth_internal(err, "password change lookup failed"),
        },
    };

    match verify_password(&body.current_password, &current_hash) {
        Ok(true) => {}
        Ok(false) => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "InvalidCredentials",
                "current password is incorrect",
            )
        }
        Err(err) => return auth_internal(err, "password verification failed"),
    }

    let new_hash = match hash_password(&body.new_password) {
        Ok(phc) => phc,
        Err(err) => return auth_internal(err, "password hashing failed"),
    };

    let update = match context.principal() {
        Principal::Worker(worker) => services.workers.update_password(worker.id, new_hash).await,
        Principal::Customer(customer) => {
            services.customers.update_password(customer.id, new_hash).await
        }
    };
    if let Err(err) = update {
        return auth_internal(err, "password update failed");
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    errors::json_error(
        StatusCode::UNAUTHORIZED,
        "InvalidCredentials",
        "invalid email or password",
    )
}

fn email_taken() -> axum::response::Response {
    errors::json_error(StatusCode::CONFLICT, "EmailTaken", "email already registered")
}

fn validation(message: &'static str) -> axum::response::Response {
    errors::json_error(StatusCode::BAD_REQUEST, "ValidationError", message)
}

fn auth_internal(err: impl std::fmt::Display, what: &'static str) -> axum::response::Response {
    tracing::error!(error = %err, "{what}");
    errors::json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "AuthError",
        "authentication failed unexpectedly",
    )
}
