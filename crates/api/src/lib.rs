//! HTTP API: auth middleware chain, role gates, routing, and wiring.

pub mod app;
pub mod context;
pub mod guards;
pub mod middleware;
pub mod resolver;
