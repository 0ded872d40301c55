//! Read-only aggregates: dashboard figures, reports and per-area summaries.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde_json::{json, Value as JsonValue};

use infoco_auth::Capability;
use infoco_business::{
    contract_deadlines, today, Asset, AssetSummary, DashboardStats, Employee, FinanceSummary,
    InternalExpense, InternalExpenseSummary, Municipality, Notification, ReportFilter, Task,
    TaskFilter, TaskReport, Transaction,
};
use infoco_core::Collection;

use crate::app::dto::Items;
use crate::app::errors::ApiResult;
use crate::app::services::Dashboard;
use crate::authz::{self, Access};

pub async fn dashboard_stats(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<JsonValue>> {
    let state = dashboard.lock().await;
    authz::require(&state, Capability::ViewDashboard)?;
    let ws = &state.workspace;
    let stats = DashboardStats::compute(ws.list::<Employee>(), ws.list::<Task>());
    let deadlines: Vec<_> = contract_deadlines(ws.list::<Municipality>())
        .into_iter()
        .map(|(date, municipality)| json!({ "date": date, "municipality": municipality }))
        .collect();
    Ok(Json(json!({
        "stats": stats,
        "unreadNotifications": Notification::unread_count(ws.list::<Notification>()),
        "contractDeadlines": deadlines,
    })))
}

pub async fn task_report(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Query(filter): Query<ReportFilter>,
) -> ApiResult<Json<TaskReport>> {
    let state = dashboard.lock().await;
    authz::require(&state, Capability::ViewReports)?;
    let ws = &state.workspace;
    Ok(Json(TaskReport::run(filter, ws.list::<Employee>(), ws.list::<Task>())))
}

pub async fn filtered_tasks(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<Items<Task>>> {
    let state = dashboard.lock().await;
    authz::require_collection(&state, Collection::Tasks, Access::Read)?;
    let tasks = filter
        .apply(state.workspace.list::<Task>())
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    Ok(Json(tasks.into()))
}

pub async fn finance_summary(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<JsonValue>> {
    let state = dashboard.lock().await;
    authz::require(&state, Capability::ManageFinance)?;
    let ws = &state.workspace;
    let summary = FinanceSummary::compute(ws.list::<Municipality>(), ws.list::<Transaction>());
    Ok(Json(json!({
        "summary": summary,
        "projectedBalance": summary.projected_balance(),
    })))
}

pub async fn internal_expense_summary(
    Extension(dashboard): Extension<Arc<Dashboard>>,
) -> ApiResult<Json<InternalExpenseSummary>> {
    let state = dashboard.lock().await;
    authz::require_collection(&state, Collection::InternalExpenses, Access::Read)?;
    Ok(Json(InternalExpenseSummary::compute(
        state.workspace.list::<InternalExpense>(),
        today(),
    )))
}

pub async fn asset_summary(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<AssetSummary>> {
    let state = dashboard.lock().await;
    authz::require_collection(&state, Collection::Assets, Access::Read)?;
    Ok(Json(AssetSummary::compute(state.workspace.list::<Asset>())))
}
