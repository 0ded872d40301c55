use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, put},
    Json, Router,
};

use infoco_auth::{Capability, Role};

use crate::app::dto::{permission_rows, CapabilityUpdate, Items, RoleRow};
use crate::app::errors::{ApiError, ApiResult};
use crate::app::services::Dashboard;
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list))
        .route("/:role/:capability", put(set))
}

async fn list(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<Items<RoleRow>>> {
    let state = dashboard.lock().await;
    authz::require(&state, Capability::ManageSettings)?;
    Ok(Json(permission_rows(state.workspace.matrix()).into()))
}

async fn set(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path((role, capability)): Path<(String, String)>,
    Json(body): Json<CapabilityUpdate>,
) -> ApiResult<Json<Items<RoleRow>>> {
    let role: Role = role.parse().map_err(|e| ApiError::bad_request(format!("{e}")))?;
    let capability: Capability = capability
        .parse()
        .map_err(|e| ApiError::bad_request(format!("{e}")))?;

    let mut state = dashboard.lock().await;
    authz::require(&state, Capability::ManageSettings)?;
    state.workspace.set_capability(role, capability, body.value)?;
    Ok(Json(permission_rows(state.workspace.matrix()).into()))
}
