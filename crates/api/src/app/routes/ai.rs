//! Pass-through to the analysis and news collaborators.
//!
//! The state lock is released before any outbound call.

use std::sync::Arc;

use axum::{extract::Extension, Json};
use serde::Deserialize;

use infoco_ai::{AnalysisRequest, AnalysisResponse, NewsFeed};
use infoco_auth::Capability;

use crate::app::errors::ApiResult;
use crate::app::services::Dashboard;
use crate::authz;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub user_input: String,
}

pub async fn analyze(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Json(body): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalysisResponse>> {
    let context = {
        let state = dashboard.lock().await;
        authz::require(&state, Capability::ViewDashboard)?;
        state.workspace.analysis_context()
    };
    let request = AnalysisRequest::new(body.user_input, context);
    request.check()?;
    Ok(Json(dashboard.analysis().analyze(request).await?))
}

pub async fn news(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<NewsFeed>> {
    {
        let state = dashboard.lock().await;
        authz::require(&state, Capability::ViewDashboard)?;
    }
    Ok(Json(dashboard.news().fetch_news().await?))
}
