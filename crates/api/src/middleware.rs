//! Auth middleware chain: header, token, principal, context.
//!
//! Both modes run the same pipeline; they differ only in what happens on
//! failure. Required mode rejects with the wire code of the stage that
//! failed. Optional mode degrades client-side failures to an anonymous
//! request but still rejects on infrastructure failures.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use sportiva_auth::TokenCodec;

use crate::app::errors::AuthFailure;
use crate::context::{AuthContext, OptionalAuth};
use crate::resolver::{PrincipalResolver, ResolveError};

/// Shared state for the auth middleware, built once at startup.
#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<dyn TokenCodec>,
    pub resolver: Arc<PrincipalResolver>,
}

/// Required-mode authentication.
///
/// On success the [`AuthContext`] is attached as a request extension; role
/// gates and handlers downstream read it without touching the stores again.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let context = match authenticate(&state, req.headers()).await {
        Ok(context) => context,
        Err(failure) => {
            if !failure.status().is_server_error() {
                tracing::warn!(code = failure.code(), "request rejected");
            }
            return failure.into_response();
        }
    };

    tracing::debug!(kind = %context.kind(), "principal attached");
    req.extensions_mut().insert(context);
    next.run(req).await
}

/// Optional-mode authentication.
///
/// Attaches [`OptionalAuth`] unconditionally: a bad or stale token and a
/// disabled account all degrade to `OptionalAuth(None)` instead of failing
/// the request. Store failures do not degrade; an outage must not make
/// every caller look anonymous.
pub async fn optional_auth(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let attached = match authenticate(&state, req.headers()).await {
        Ok(context) => Some(context),
        Err(failure) if failure.status().is_server_error() => {
            return failure.into_response();
        }
        Err(failure) => {
            tracing::debug!(code = failure.code(), "proceeding anonymously");
            None
        }
    };

    req.extensions_mut().insert(OptionalAuth(attached));
    next.run(req).await
}

async fn authenticate(
    state: &AuthState,
    headers: &HeaderMap,
) -> Result<AuthContext, AuthFailure> {
    let token = extract_bearer(headers)?;
    let claims = state.codec.parse(token).map_err(AuthFailure::from)?;
    let principal = state.resolver.resolve(&claims).await.map_err(|err| {
        if let ResolveError::Store(ref store_err) = err {
            tracing::error!(error = %store_err, "principal resolution failed");
        }
        AuthFailure::from(err)
    })?;
    Ok(AuthContext::new(principal))
}

/// Pull the raw token out of the `Authorization` header.
///
/// The header must be exactly two whitespace-separated segments with the
/// literal scheme `Bearer`; a missing header and a malformed one are
/// distinct wire codes.
fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthFailure> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthFailure::NoToken)?;

    let header = header.to_str().map_err(|_| AuthFailure::InvalidFormat)?;

    let mut segments = header.split_whitespace();
    let (scheme, token) = match (segments.next(), segments.next(), segments.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err(AuthFailure::InvalidFormat),
    };
    if scheme != "Bearer" {
        return Err(AuthFailure::InvalidFormat);
    }

    Ok(token)
}
