//! Route handlers, grouped by surface area.
//!
//! Composition lives in [`crate::app::build_router`]: each area carries a
//! different middleware stack, so the routers are assembled where the auth
//! state is in scope.

pub mod account;
pub mod admin;
pub mod auth;
pub mod staff;
pub mod storefront;
pub mod system;
