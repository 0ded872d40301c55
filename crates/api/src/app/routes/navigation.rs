use std::sync::Arc;

use axum::{extract::Extension, routing::get, Json, Router};

use infoco_navigation::ViewId;

use crate::app::dto::{NavigationView, SelectViewRequest};
use crate::app::errors::ApiResult;
use crate::app::services::Dashboard;

pub fn router() -> Router {
    Router::new().route("/", get(current).post(select))
}

/// Re-checks the selected view against the live matrix on every call.
async fn current(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<NavigationView>> {
    let mut guard = dashboard.lock().await;
    let state = &mut *guard;
    let capabilities = state.capabilities()?;
    state.gate.revalidate(&capabilities);
    Ok(Json(NavigationView::new(&state.gate, &capabilities)))
}

async fn select(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Json(body): Json<SelectViewRequest>,
) -> ApiResult<Json<NavigationView>> {
    let mut guard = dashboard.lock().await;
    let state = &mut *guard;
    let capabilities = state.capabilities()?;
    state.gate.request(ViewId::parse_or_default(&body.view), &capabilities);
    Ok(Json(NavigationView::new(&state.gate, &capabilities)))
}
