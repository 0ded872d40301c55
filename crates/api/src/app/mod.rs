//! HTTP application wiring.
//!
//! - `services.rs`: the shared dashboard state and its collaborators
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request/response shapes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{Dashboard, DashboardState, SharedKv};

/// Build the full HTTP router around an already wired dashboard.
pub fn build_app(dashboard: Arc<Dashboard>) -> Router {
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        dashboard.clone(),
        middleware::require_session,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/session", post(routes::session::login))
        .route("/settings/login-image", get(routes::settings::login_image))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(dashboard)))
}
