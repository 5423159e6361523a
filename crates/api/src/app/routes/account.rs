//! Customer back-office area, behind the live admin-flag gate.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors::AuthFailure;
use crate::context::AuthContext;

/// GET /account/admin
///
/// The gate has already re-checked the record; this handler only reads
/// the context.
pub async fn admin_area(Extension(context): Extension<AuthContext>) -> axum::response::Response {
    let customer = match context.customer() {
        Some(customer) => customer,
        None => return AuthFailure::AdminRequired.into_response(),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "area": "customer-admin",
            "customer": customer.given_name,
        })),
    )
        .into_response()
}
