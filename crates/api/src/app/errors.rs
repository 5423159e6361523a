//! Wire-level failure envelope.
//!
//! Every rejection leaves the process as
//! `{"success": false, "message": ..., "code": ...}` with a stable `code`
//! that clients branch on. The `message` is for humans and may be
//! reworded; the `code` set is a compatibility contract.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sportiva_auth::{GuardError, TokenError};

use crate::resolver::ResolveError;

/// Authentication and authorization failures with a fixed wire mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    NoToken,
    InvalidFormat,
    TokenExpired,
    InvalidToken,
    WorkerNotFound,
    ClientNotFound,
    AccountDisabled,
    WorkerAuthRequired,
    AdminRequired,
    SalespersonRequired,
    AuthError,
    PermissionError,
}

impl AuthFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthFailure::NoToken
            | AuthFailure::InvalidFormat
            | AuthFailure::TokenExpired
            | AuthFailure::InvalidToken
            | AuthFailure::WorkerNotFound
            | AuthFailure::ClientNotFound
            | AuthFailure::WorkerAuthRequired => StatusCode::UNAUTHORIZED,
            AuthFailure::AccountDisabled
            | AuthFailure::AdminRequired
            | AuthFailure::SalespersonRequired => StatusCode::FORBIDDEN,
            AuthFailure::AuthError | AuthFailure::PermissionError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::NoToken => "NoToken",
            AuthFailure::InvalidFormat => "InvalidFormat",
            AuthFailure::TokenExpired => "TokenExpired",
            AuthFailure::InvalidToken => "InvalidToken",
            AuthFailure::WorkerNotFound => "WorkerNotFound",
            AuthFailure::ClientNotFound => "ClientNotFound",
            AuthFailure::AccountDisabled => "AccountDisabled",
            AuthFailure::WorkerAuthRequired => "WorkerAuthRequired",
            AuthFailure::AdminRequired => "AdminRequired",
            AuthFailure::SalespersonRequired => "SalespersonRequired",
            AuthFailure::AuthError => "AuthError",
            AuthFailure::PermissionError => "PermissionError",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::NoToken => "authentication token required",
            AuthFailure::InvalidFormat => "malformed authorization header",
            AuthFailure::TokenExpired => "token has expired, log in again",
            AuthFailure::InvalidToken => "invalid authentication token",
            AuthFailure::WorkerNotFound => "worker account not found",
            AuthFailure::ClientNotFound => "customer account not found",
            AuthFailure::AccountDisabled => "account is disabled",
            AuthFailure::WorkerAuthRequired => "worker authentication required",
            AuthFailure::AdminRequired => "administrator privileges required",
            AuthFailure::SalespersonRequired => "salesperson privileges required",
            AuthFailure::AuthError => "authentication failed unexpectedly",
            AuthFailure::PermissionError => "permission check failed unexpectedly",
        }
    }
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> axum::response::Response {
        json_error(self.status(), self.code(), self.message())
    }
}

impl From<TokenError> for AuthFailure {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthFailure::TokenExpired,
            TokenError::Malformed | TokenError::InvalidSignature => AuthFailure::InvalidToken,
        }
    }
}

impl From<ResolveError> for AuthFailure {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::WorkerNotFound => AuthFailure::WorkerNotFound,
            ResolveError::CustomerNotFound => AuthFailure::ClientNotFound,
            ResolveError::AccountDisabled => AuthFailure::AccountDisabled,
            ResolveError::Store(_) => AuthFailure::AuthError,
        }
    }
}

impl From<GuardError> for AuthFailure {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::WorkerAuthRequired => AuthFailure::WorkerAuthRequired,
            GuardError::AdminRequired => AuthFailure::AdminRequired,
            GuardError::SalespersonRequired => AuthFailure::SalespersonRequired,
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "message": message.into(),
            "code": code,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_has_the_contract_status() {
        let cases = [
            (AuthFailure::NoToken, StatusCode::UNAUTHORIZED),
            (AuthFailure::InvalidFormat, StatusCode::UNAUTHORIZED),
            (AuthFailure::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthFailure::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthFailure::WorkerNotFound, StatusCode::UNAUTHORIZED),
            (AuthFailure::ClientNotFound, StatusCode::UNAUTHORIZED),
            (AuthFailure::AccountDisabled, StatusCode::FORBIDDEN),
            (AuthFailure::WorkerAuthRequired, StatusCode::UNAUTHORIZED),
            (AuthFailure::AdminRequired, StatusCode::FORBIDDEN),
            (AuthFailure::SalespersonRequired, StatusCode::FORBIDDEN),
            (AuthFailure::AuthError, StatusCode::INTERNAL_SERVER_ERROR),
            (AuthFailure::PermissionError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (failure, status) in cases {
            assert_eq!(failure.status(), status, "{}", failure.code());
        }
    }

    #[test]
    fn expired_tokens_keep_their_own_code() {
        assert_eq!(AuthFailure::from(TokenError::Expired), AuthFailure::TokenExpired);
        assert_eq!(
            AuthFailure::from(TokenError::InvalidSignature),
            AuthFailure::InvalidToken
        );
        assert_eq!(AuthFailure::from(TokenError::Malformed), AuthFailure::InvalidToken);
    }

    #[test]
    fn store_failures_become_auth_error_not_a_client_code() {
        let err = ResolveError::Store(sportiva_accounts::StoreError::Unavailable(
            "connection refused".into(),
        ));
        assert_eq!(AuthFailure::from(err), AuthFailure::AuthError);
    }
}
