//! Public storefront pages with optional personalization.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::OptionalAuth;

/// GET /storefront/home
///
/// Greets a signed-in customer by name; everyone else, workers included,
/// gets the anonymous page.
pub async fn home(Extension(auth): Extension<OptionalAuth>) -> axum::response::Response {
    let greeting = match auth.customer() {
        Some(customer) => format!("Welcome back, {}", customer.given_name),
        None => "Welcome to Sportiva".to_string(),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "greeting": greeting })),
    )
        .into_response()
}
