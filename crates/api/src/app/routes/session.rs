use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, routing::put, Json, Router};

use infoco_business::uploads;

use crate::app::dto::{AvatarRequest, LoginRequest, SessionView};
use crate::app::errors::ApiResult;
use crate::app::services::{Dashboard, DashboardState};

/// Routes behind the session check; login itself is mounted publicly.
pub fn router() -> Router {
    Router::new()
        .route("/", axum::routing::get(current).delete(logout))
        .route("/avatar", put(update_avatar))
}

fn view(state: &DashboardState) -> ApiResult<SessionView> {
    let principal = state.principal()?.clone();
    let capabilities = state.capabilities()?;
    Ok(SessionView::new(principal, &capabilities, &state.gate))
}

pub async fn login(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<SessionView>> {
    let mut guard = dashboard.lock().await;
    let state = &mut *guard;
    state
        .session
        .authenticate(state.workspace.accounts(), &body.email, &body.password)?;
    state.gate.reset();
    Ok(Json(view(state)?))
}

async fn current(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<SessionView>> {
    let mut guard = dashboard.lock().await;
    let state = &mut *guard;
    let capabilities = state.capabilities()?;
    state.gate.revalidate(&capabilities);
    Ok(Json(view(state)?))
}

async fn logout(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<StatusCode> {
    let mut state = dashboard.lock().await;
    state.session.end_session()?;
    state.gate.reset();
    Ok(StatusCode::NO_CONTENT)
}

async fn update_avatar(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Json(body): Json<AvatarRequest>,
) -> ApiResult<Json<SessionView>> {
    uploads::ensure_image("avatar", &body.avatar)?;
    let mut state = dashboard.lock().await;
    state.session.update_avatar(body.avatar)?;
    Ok(Json(view(&state)?))
}
