//! Role gates, applied after the auth chain.
//!
//! Worker-side gates are pure checks against the already-resolved context.
//! The customer admin gate is the exception: it re-reads the record so the
//! flag can be granted or revoked mid-session.

use axum::{
    extract::State,
    middleware::Next,
    response::{IntoResponse, Response},
};

use sportiva_auth::guard;

use crate::app::errors::AuthFailure;
use crate::context::AuthContext;
use crate::middleware::AuthState;

/// Reject unless a worker principal is attached.
pub async fn require_worker(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match context_of(&req) {
        Ok(context) => match guard::require_worker(context.principal()) {
            Ok(_) => next.run(req).await,
            Err(err) => AuthFailure::from(err).into_response(),
        },
        Err(failure) => failure.into_response(),
    }
}

/// Reject unless the attached worker holds the administrator role.
pub async fn require_admin(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match context_of(&req) {
        Ok(context) => match guard::require_admin(context.principal()) {
            Ok(_) => next.run(req).await,
            Err(err) => AuthFailure::from(err).into_response(),
        },
        Err(failure) => failure.into_response(),
    }
}

/// Reject unless the attached worker can act as a salesperson.
/// Administrators pass; the elevation never runs the other way.
pub async fn require_salesperson(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match context_of(&req) {
        Ok(context) => match guard::require_salesperson(context.principal()) {
            Ok(_) => next.run(req).await,
            Err(err) => AuthFailure::from(err).into_response(),
        },
        Err(failure) => failure.into_response(),
    }
}

/// Reject unless the live customer record carries the admin flag.
///
/// The context snapshot does not hold the flag at all; the gate consults
/// the store on every pass. Workers and flagless customers get the same
/// refusal.
pub async fn require_customer_admin(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let customer_id = match context_of(&req) {
        Ok(context) => match context.customer() {
            Some(customer) => customer.id,
            None => return AuthFailure::AdminRequired.into_response(),
        },
        Err(failure) => return failure.into_response(),
    };

    match state.resolver.customer_admin_flag(customer_id).await {
        Ok(true) => next.run(req).await,
        Ok(false) => AuthFailure::AdminRequired.into_response(),
        Err(err) => {
            tracing::error!(error = %err, "admin flag check failed");
            AuthFailure::PermissionError.into_response()
        }
    }
}

/// A gate without an auth context is a router wiring mistake, not a caller
/// mistake; surface it as a server-side failure.
fn context_of(
    req: &axum::http::Request<axum::body::Body>,
) -> Result<&AuthContext, AuthFailure> {
    req.extensions().get::<AuthContext>().ok_or_else(|| {
        tracing::error!("role gate reached without an auth context; check router layering");
        AuthFailure::PermissionError
    })
}
