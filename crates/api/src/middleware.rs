use std::sync::Arc;

use axum::{extract::State, middleware::Next, response::Response};

use crate::app::errors::ApiError;
use crate::app::services::Dashboard;
use crate::context::SessionContext;

/// Reject requests made without an active session.
pub async fn require_session(
    State(dashboard): State<Arc<Dashboard>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = dashboard.lock().await.principal()?.clone();

    tracing::trace!(email = %principal.email, path = %req.uri().path(), "session request");
    req.extensions_mut().insert(SessionContext::new(principal));

    Ok(next.run(req).await)
}
