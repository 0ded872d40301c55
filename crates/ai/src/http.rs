//! reqwest client for the analysis/news backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::analysis::{AnalysisRequest, AnalysisResponse, AnalysisService};
use crate::error::{ExternalServiceError, ServiceResult};
use crate::news::{parse_news_payload, NewsFeed, NewsService};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `POST {base}/analyze` and `GET {base}/news`.
#[derive(Debug, Clone)]
pub struct HttpAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExternalServiceError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Body text of a successful response, or the classified error.
    async fn read(&self, response: reqwest::Response) -> ServiceResult<String> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                format!(
                    "{} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("error")
                )
            });
        let err = ExternalServiceError::from_status(status.as_u16(), message);
        tracing::warn!(status = status.as_u16(), code = err.code(), "AI service returned an error");
        Err(err)
    }
}

#[async_trait]
impl AnalysisService for HttpAiClient {
    async fn analyze(&self, request: AnalysisRequest) -> ServiceResult<AnalysisResponse> {
        request.check()?;
        let response = self
            .client
            .post(self.url("analyze"))
            .json(&request)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "analyze request failed"))?;
        let body = self.read(response).await?;

        let parsed: AnalysisResponse = serde_json::from_str(&body)
            .map_err(|e| ExternalServiceError::InvalidResponse(e.to_string()))?;
        if parsed.response.trim().is_empty() {
            return Err(ExternalServiceError::InvalidResponse("empty analysis".into()));
        }
        Ok(parsed)
    }
}

#[async_trait]
impl NewsService for HttpAiClient {
    async fn fetch_news(&self) -> ServiceResult<NewsFeed> {
        let response = self
            .client
            .get(self.url("news"))
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "news request failed"))?;
        let body = self.read(response).await?;

        match serde_json::from_str::<NewsFeed>(&body) {
            Ok(feed) => Ok(feed),
            Err(err) => {
                tracing::warn!(error = %err, "malformed news feed, trying the tolerant parser");
                Ok(NewsFeed {
                    articles: parse_news_payload(&body)?,
                    sources: Vec::new(),
                })
            }
        }
    }
}
