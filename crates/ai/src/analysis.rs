use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{ExternalServiceError, ServiceResult};

/// Question plus the data snapshot it is about (employees, tasks, finance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub user_input: String,
    pub context_data: JsonValue,
}

impl AnalysisRequest {
    pub fn new(user_input: impl Into<String>, context_data: JsonValue) -> Self {
        Self {
            user_input: user_input.into(),
            context_data,
        }
    }

    /// Reject requests the service would answer with 400 anyway.
    pub fn check(&self) -> ServiceResult<()> {
        if self.user_input.trim().is_empty() {
            return Err(ExternalServiceError::BadRequest("missing userInput".into()));
        }
        if self.context_data.is_null() {
            return Err(ExternalServiceError::BadRequest("missing contextData".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub response: String,
}

/// Natural-language analysis of a data snapshot.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> ServiceResult<AnalysisResponse>;
}

#[async_trait]
impl<T: AnalysisService + ?Sized> AnalysisService for std::sync::Arc<T> {
    async fn analyze(&self, request: AnalysisRequest) -> ServiceResult<AnalysisResponse> {
        (**self).analyze(request).await
    }
}
