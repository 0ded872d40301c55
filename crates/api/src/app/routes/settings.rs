use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value as JsonValue};

use infoco_auth::Capability;

use crate::app::dto::LoginImageRequest;
use crate::app::errors::ApiResult;
use crate::app::services::Dashboard;
use crate::authz;

/// Public: the login screen shows it before anyone is signed in.
pub async fn login_image(Extension(dashboard): Extension<Arc<Dashboard>>) -> Json<JsonValue> {
    let state = dashboard.lock().await;
    Json(json!({ "image": state.workspace.login_image() }))
}

pub async fn set_login_image(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Json(body): Json<LoginImageRequest>,
) -> ApiResult<StatusCode> {
    let mut state = dashboard.lock().await;
    authz::require(&state, Capability::ManageSettings)?;
    let restored = body.image.is_none();
    state.workspace.set_login_image(body.image)?;
    tracing::info!(restored, "login image updated");
    Ok(StatusCode::NO_CONTENT)
}
