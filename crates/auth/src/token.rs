use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, AccessClaims, TokenValidationError};

/// Token codec failure, split by how callers should react.
///
/// Expiry stays distinct from signature trouble: an expired token means
/// "log in again", a bad signature means the bytes cannot be trusted at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not decodable as a token, or the decoded claim window is nonsense.
    #[error("malformed token")]
    Malformed,

    /// Signature verified but the token is past its expiry.
    #[error("token has expired")]
    Expired,

    /// Signature (or any other verification step) failed.
    #[error("invalid token signature")]
    InvalidSignature,
}

/// Issues and parses signed access tokens.
///
/// Object-safe so callers can hold a codec behind `Arc<dyn TokenCodec>` and
/// swap implementations in tests.
pub trait TokenCodec: Send + Sync {
    /// Serialize and sign the claims into a compact token string.
    fn issue(&self, claims: &AccessClaims) -> Result<String, TokenError>;

    /// Verify the signature, decode the claims and validate their window.
    fn parse(&self, token: &str) -> Result<AccessClaims, TokenError>;
}

/// HS256 codec over a process-wide shared secret.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced by `validate_claims` with an exact `now >= exp`
        // boundary and zero leeway; the library only owns the signature.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn issue(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|_| TokenError::Malformed)
    }

    fn parse(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| classify_decode_error(&err))?;
        match validate_claims(&data.claims, Utc::now()) {
            Ok(()) => Ok(data.claims),
            Err(TokenValidationError::Expired) => Err(TokenError::Expired),
            Err(_) => Err(TokenError::Malformed),
        }
    }
}

fn classify_decode_error(err: &jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Malformed,
        _ => TokenError::InvalidSignature,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sportiva_core::{CustomerId, WorkerId};

    use super::*;
    use crate::claims::TokenSubject;
    use crate::StaffRole;

    fn codec() -> Hs256TokenCodec {
        Hs256TokenCodec::new(b"unit-test-secret")
    }

    fn worker_subject() -> TokenSubject {
        TokenSubject::Worker {
            worker_id: WorkerId::new(),
            role: StaffRole::Salesperson,
        }
    }

    #[test]
    fn worker_token_round_trips() {
        let codec = codec();
        let claims = AccessClaims::issue_now(
            worker_subject(),
            "leo@sportiva.test",
            "Leo",
            Duration::hours(8),
        );
        let token = codec.issue(&claims).unwrap();
        let parsed = codec.parse(&token).unwrap();
        assert_eq!(parsed, claims);
    }

    #[test]
    fn customer_token_round_trips() {
        let codec = codec();
        let claims = AccessClaims::issue_now(
            TokenSubject::Customer {
                customer_id: CustomerId::new(),
            },
            "maria@example.test",
            "Maria",
            Duration::hours(8),
        );
        let token = codec.issue(&claims).unwrap();
        let parsed = codec.parse(&token).unwrap();
        assert_eq!(parsed, claims);
    }

    #[test]
    fn expired_token_is_expired_not_invalid() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            subject: worker_subject(),
            email: "leo@sportiva.test".into(),
            given_name: "Leo".into(),
            iat: now - 3_600,
            exp: now - 60,
        };
        let token = codec.issue(&claims).unwrap();
        assert_eq!(codec.parse(&token), Err(TokenError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let claims = AccessClaims::issue_now(
            worker_subject(),
            "leo@sportiva.test",
            "Leo",
            Duration::hours(8),
        );
        let token = Hs256TokenCodec::new(b"other-secret").issue(&claims).unwrap();
        assert_eq!(codec().parse(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec();
        let claims = AccessClaims::issue_now(
            worker_subject(),
            "leo@sportiva.test",
            "Leo",
            Duration::hours(8),
        );
        let token = codec.issue(&claims).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let swapped = Hs256TokenCodec::new(b"unit-test-secret")
            .issue(&AccessClaims::issue_now(
                TokenSubject::Customer {
                    customer_id: CustomerId::new(),
                },
                "maria@example.test",
                "Maria",
                Duration::hours(8),
            ))
            .unwrap();
        let other_payload = swapped.split('.').nth(1).unwrap().to_owned();
        parts[1] = &other_payload;
        let frankenstein = parts.join(".");
        assert_eq!(codec.parse(&frankenstein), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = codec();
        assert_eq!(codec.parse(""), Err(TokenError::Malformed));
        assert_eq!(codec.parse("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec.parse("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn well_signed_but_unrecognized_claims_are_malformed() {
        // Valid signature, but the payload does not deserialize as claims.
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "email": "leo@sportiva.test" }),
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();
        assert_eq!(codec().parse(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn inverted_window_is_malformed() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            subject: worker_subject(),
            email: "leo@sportiva.test".into(),
            given_name: "Leo".into(),
            iat: now,
            exp: now - 10,
        };
        let token = codec.issue(&claims).unwrap();
        assert_eq!(codec.parse(&token), Err(TokenError::Malformed));
    }
}

#[cfg(test)]
mod proptest_tests {
    use chrono::Duration;
    use proptest::prelude::*;
    use sportiva_core::{CustomerId, WorkerId};

    use super::*;
    use crate::claims::TokenSubject;
    use crate::StaffRole;

    fn subject_strategy() -> impl Strategy<Value = TokenSubject> {
        prop_oneof![
            (any::<u128>(), any::<bool>()).prop_map(|(n, admin)| TokenSubject::Worker {
                worker_id: WorkerId::from_uuid(uuid::Uuid::from_u128(n)),
                role: if admin {
                    StaffRole::Administrator
                } else {
                    StaffRole::Salesperson
                },
            }),
            any::<u128>().prop_map(|n| TokenSubject::Customer {
                customer_id: CustomerId::from_uuid(uuid::Uuid::from_u128(n)),
            }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every issued token parses back to exactly the claims
        /// that went in, for both subject kinds and arbitrary profile text.
        #[test]
        fn issue_then_parse_is_identity(
            subject in subject_strategy(),
            email in "[a-z]{1,12}@[a-z]{1,10}\\.(com|net|test)",
            given_name in "[A-Za-z][A-Za-z ]{0,30}",
            ttl_secs in 60i64..86_400i64,
        ) {
            let codec = Hs256TokenCodec::new(b"proptest-secret");
            let claims = AccessClaims::issue_now(
                subject,
                email,
                given_name,
                Duration::seconds(ttl_secs),
            );
            let token = codec.issue(&claims).unwrap();
            let parsed = codec.parse(&token).unwrap();
            prop_assert_eq!(parsed, claims);
        }
    }
}
