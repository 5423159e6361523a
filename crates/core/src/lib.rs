//! `sportiva-core` — shared domain primitives.
//!
//! Strongly-typed identifiers, the domain error model, and email
//! normalization. No transport or storage concerns.

pub mod email;
pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, WorkerId};
