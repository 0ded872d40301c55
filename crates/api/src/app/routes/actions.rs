//! Domain actions that are not plain record submits.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value as JsonValue};

use infoco_business::{
    add_maintenance_record, generate_payroll, Asset, Employee, MaintenanceEntry, Notification,
    PayrollRecord,
};
use infoco_core::{Collection, RecordId};
use infoco_navigation::ViewId;

use crate::app::dto::{GeneratePayrollRequest, NavigationView};
use crate::app::errors::ApiResult;
use crate::app::services::Dashboard;
use crate::authz::{self, Access};

pub fn asset_routes() -> Router {
    Router::new().route("/:id/maintenance", post(add_maintenance))
}

pub fn payroll_routes() -> Router {
    Router::new().route("/generate", post(generate))
}

pub fn notification_routes() -> Router {
    Router::new()
        .route("/unread", axum::routing::get(unread))
        .route("/read-all", post(read_all))
        .route("/:id/read", post(read_one))
        .route("/:id/open", post(open))
}

async fn add_maintenance(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<RecordId>,
    Json(entry): Json<MaintenanceEntry>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let mut state = dashboard.lock().await;
    authz::require_collection(&state, Collection::Assets, Access::Write)?;
    let record_id = state
        .workspace
        .mutate::<Asset, _, _>(|assets| add_maintenance_record(assets, id, entry))?;
    Ok((StatusCode::CREATED, Json(json!({ "id": record_id }))))
}

async fn generate(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Json(body): Json<GeneratePayrollRequest>,
) -> ApiResult<Json<JsonValue>> {
    let mut state = dashboard.lock().await;
    authz::require_collection(&state, Collection::Payrolls, Access::Write)?;
    let employees = state.workspace.list::<Employee>().to_vec();
    let created = state
        .workspace
        .mutate::<PayrollRecord, _, _>(|payrolls| generate_payroll(&employees, payrolls, body.month_year))?;
    Ok(Json(json!({ "monthYear": body.month_year, "created": created })))
}

async fn unread(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<JsonValue>> {
    let state = dashboard.lock().await;
    authz::require_collection(&state, Collection::Notifications, Access::Read)?;
    let count = Notification::unread_count(state.workspace.list::<Notification>());
    Ok(Json(json!({ "unread": count })))
}

async fn read_all(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<StatusCode> {
    let mut state = dashboard.lock().await;
    authz::require_collection(&state, Collection::Notifications, Access::Write)?;
    state.workspace.mutate::<Notification, _, _>(|store| {
        Notification::mark_all_read(store);
        Ok(())
    })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn read_one(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<RecordId>,
) -> ApiResult<StatusCode> {
    let mut state = dashboard.lock().await;
    authz::require_collection(&state, Collection::Notifications, Access::Write)?;
    state
        .workspace
        .mutate::<Notification, _, _>(|store| Notification::mark_read(store, id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark a notification read and follow its link through the gate.
async fn open(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<NavigationView>> {
    let mut guard = dashboard.lock().await;
    let state = &mut *guard;
    authz::require_collection(state, Collection::Notifications, Access::Write)?;
    let capabilities = state.capabilities()?;

    let link = state.workspace.get::<Notification>(id)?.link.clone();
    state
        .workspace
        .mutate::<Notification, _, _>(|store| Notification::mark_read(store, id))?;
    if let Some(link) = link {
        state.gate.request(ViewId::parse_or_default(&link), &capabilities);
    }
    Ok(Json(NavigationView::new(&state.gate, &capabilities)))
}
