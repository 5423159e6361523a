//! Email address normalization.
//!
//! Addresses are unique case-insensitively across both account kinds, so
//! every stored record and every lookup goes through [`normalize`] first.

use crate::error::{DomainError, DomainResult};

/// Normalize an email address for storage and comparison.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal structural check (non-empty, an `@` somewhere inside) returning
/// the normalized form. Deliverability is not checked here.
pub fn validate(email: &str) -> DomainResult<String> {
    let normalized = normalize(email);
    if normalized.is_empty() || !normalized.contains('@') {
        return Err(DomainError::validation("malformed email address"));
    }
    Ok(normalized)
}
