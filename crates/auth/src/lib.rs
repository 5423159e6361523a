//! `sportiva-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! issue/parse, credential hashing, principal projections and role gates
//! live here. Record lookups and wire-code mapping belong to the callers.

pub mod claims;
pub mod guard;
pub mod password;
pub mod principal;
pub mod roles;
pub mod token;

pub use claims::{validate_claims, AccessClaims, TokenSubject, TokenValidationError};
pub use guard::{require_admin, require_salesperson, require_worker, GuardError};
pub use password::{hash_password, verify_password, CredentialError};
pub use principal::{CustomerPrincipal, Principal, PrincipalKind, WorkerPrincipal};
pub use roles::StaffRole;
pub use token::{Hs256TokenCodec, TokenCodec, TokenError};
