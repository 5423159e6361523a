//! Staff-only pages. The interesting part is the gates in front of them.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors::AuthFailure;
use crate::context::AuthContext;

/// GET /staff/dashboard
///
/// Landing page for any staff member, whatever their role.
pub async fn dashboard(Extension(context): Extension<AuthContext>) -> axum::response::Response {
    let worker = match context.worker() {
        Some(worker) => worker,
        None => return AuthFailure::WorkerAuthRequired.into_response(),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "given_name": worker.given_name,
            "role": worker.role.as_str(),
        })),
    )
        .into_response()
}

/// GET /staff/overview
///
/// Sales-side view; administrators pass the salesperson gate too.
pub async fn overview(Extension(context): Extension<AuthContext>) -> axum::response::Response {
    let worker = match context.worker() {
        Some(worker) => worker,
        None => return AuthFailure::WorkerAuthRequired.into_response(),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "area": "sales",
            "worker": worker.given_name,
        })),
    )
        .into_response()
}
