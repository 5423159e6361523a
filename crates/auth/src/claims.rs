use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sportiva_core::{CustomerId, WorkerId};

use crate::{PrincipalKind, StaffRole};

/// Access-token claims model (transport-agnostic).
///
/// This is the full set of claims Sportiva stamps into a token at login and
/// expects back once a token has been decoded and signature-verified by the
/// codec layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Which account this token speaks for.
    #[serde(flatten)]
    pub subject: TokenSubject,

    /// Email at issue time. Informational only; the live record wins.
    pub email: String,

    /// Given name at issue time. Informational only.
    pub given_name: String,

    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,

    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Subject of an access token, tagged on `kind` in the payload.
///
/// The tag makes the worker/customer split part of the signed payload, so a
/// decoded token carries exactly the identifier field that goes with its
/// kind and nothing downstream re-inspects raw claim fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenSubject {
    Worker { worker_id: WorkerId, role: StaffRole },
    Customer { customer_id: CustomerId },
}

impl TokenSubject {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            TokenSubject::Worker { .. } => PrincipalKind::Worker,
            TokenSubject::Customer { .. } => PrincipalKind::Customer,
        }
    }
}

impl AccessClaims {
    /// Stamp claims for a subject: `iat = now`, `exp = now + ttl`.
    pub fn issue_now(
        subject: TokenSubject,
        email: impl Into<String>,
        given_name: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            subject,
            email: email.into(),
            given_name: given_name.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate access-token claims.
///
/// Note: this validates the *claims* only, with a zero-leeway boundary
/// (`now >= exp` is expired). Signature verification / decoding is
/// intentionally outside this function.
pub fn validate_claims(
    claims: &AccessClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker_claims(iat: i64, exp: i64) -> AccessClaims {
        AccessClaims {
            subject: TokenSubject::Worker {
                worker_id: WorkerId::new(),
                role: StaffRole::Administrator,
            },
            email: "ana@sportiva.test".into(),
            given_name: "Ana".into(),
            iat,
            exp,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn claims_inside_window_validate() {
        let claims = worker_claims(1_000, 2_000);
        assert_eq!(validate_claims(&claims, at(1_500)), Ok(()));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        // now == exp is already expired; no leeway.
        let claims = worker_claims(1_000, 2_000);
        assert_eq!(
            validate_claims(&claims, at(2_000)),
            Err(TokenValidationError::Expired)
        );
        assert_eq!(validate_claims(&claims, at(1_999)), Ok(()));
    }

    #[test]
    fn future_iat_is_rejected() {
        let claims = worker_claims(1_000, 2_000);
        assert_eq!(
            validate_claims(&claims, at(999)),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_is_rejected_before_expiry() {
        let claims = worker_claims(2_000, 2_000);
        assert_eq!(
            validate_claims(&claims, at(3_000)),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn worker_payload_carries_kind_tag_and_role() {
        let id = WorkerId::new();
        let claims = AccessClaims {
            subject: TokenSubject::Worker {
                worker_id: id,
                role: StaffRole::Salesperson,
            },
            email: "leo@sportiva.test".into(),
            given_name: "Leo".into(),
            iat: 10,
            exp: 20,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["kind"], "worker");
        assert_eq!(value["worker_id"], id.to_string());
        assert_eq!(value["role"], "salesperson");
        assert_eq!(value["iat"], 10);
        assert!(value.get("customer_id").is_none());
    }

    #[test]
    fn customer_payload_has_no_role_field() {
        let id = CustomerId::new();
        let claims = AccessClaims {
            subject: TokenSubject::Customer { customer_id: id },
            email: "maria@example.test".into(),
            given_name: "Maria".into(),
            iat: 10,
            exp: 20,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["kind"], "customer");
        assert_eq!(value["customer_id"], id.to_string());
        assert!(value.get("role").is_none());

        let back: AccessClaims = serde_json::from_value(value).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn unknown_kind_fails_to_decode() {
        let raw = serde_json::json!({
            "kind": "service",
            "worker_id": WorkerId::new().to_string(),
            "email": "svc@sportiva.test",
            "given_name": "Svc",
            "iat": 10,
            "exp": 20,
        });
        assert!(serde_json::from_value::<AccessClaims>(raw).is_err());
    }
}
