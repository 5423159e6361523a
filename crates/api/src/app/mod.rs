//! HTTP application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: configuration, shared services, first-run seeding
//! - `routes/`: HTTP handlers (one file per surface area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: the wire failure envelope

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use crate::{guards, middleware};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (public entrypoint used
/// by `main.rs`). Constructs the services, runs first-run seeding, then
/// delegates to [`build_router`].
pub async fn build_app(config: services::AppConfig) -> Router {
    let services = Arc::new(services::build_services(&config));
    services::ensure_seed_admin(&services, &config.seed_admin_password).await;
    build_router(services)
}

/// Assemble the router around pre-built services.
///
/// Split from [`build_app`] so tests can seed the stores directly and
/// exercise the exact router the binary serves.
pub fn build_router(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        codec: services.codec.clone(),
        resolver: services.resolver.clone(),
    };

    // Self-service routes for any authenticated principal.
    let session = Router::new()
        .route("/auth/profile", get(routes::auth::profile))
        .route("/auth/password", post(routes::auth::change_password))
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            middleware::require_auth,
        ));

    // Worker directory, admin only. ServiceBuilder runs top-down: the auth
    // chain resolves the principal before the role gate inspects it.
    let admin_area = Router::new()
        .route(
            "/admin/workers",
            get(routes::admin::list_workers).post(routes::admin::create_worker),
        )
        .route(
            "/admin/workers/:id/status",
            patch(routes::admin::update_worker_status),
        )
        .route(
            "/admin/workers/:id/role",
            patch(routes::admin::update_worker_role),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    auth_state.clone(),
                    middleware::require_auth,
                ))
                .layer(axum::middleware::from_fn(guards::require_admin)),
        );

    // Staff pages: the dashboard admits any worker, the sales overview
    // admits salespeople and administrators.
    let staff_area = Router::new()
        .route("/staff/dashboard", get(routes::staff::dashboard))
        .layer(axum::middleware::from_fn(guards::require_worker))
        .merge(
            Router::new()
                .route("/staff/overview", get(routes::staff::overview))
                .layer(axum::middleware::from_fn(guards::require_salesperson)),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            middleware::require_auth,
        ));

    // Customer back-office, gated on the live admin flag.
    let account_area = Router::new()
        .route("/account/admin", get(routes::account::admin_area))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    auth_state.clone(),
                    middleware::require_auth,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth_state.clone(),
                    guards::require_customer_admin,
                )),
        );

    // Storefront: anonymous works, a customer token personalizes.
    let storefront = Router::new()
        .route("/storefront/home", get(routes::storefront::home))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::optional_auth,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/worker/login", post(routes::auth::worker_login))
        .route("/auth/customer/login", post(routes::auth::customer_login))
        .route(
            "/auth/customer/register",
            post(routes::auth::customer_register),
        )
        .merge(session)
        .merge(admin_area)
        .merge(staff_area)
        .merge(account_area)
        .merge(storefront)
        .layer(Extension(services))
}
