use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ExternalServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub url: String,
    #[serde(default)]
    pub source_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// Search result the articles were grounded on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsFeed {
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

/// Aggregated news about public procurement.
#[async_trait]
pub trait NewsService: Send + Sync {
    async fn fetch_news(&self) -> ServiceResult<NewsFeed>;
}

#[async_trait]
impl<T: NewsService + ?Sized> NewsService for std::sync::Arc<T> {
    async fn fetch_news(&self) -> ServiceResult<NewsFeed> {
        (**self).fetch_news().await
    }
}

#[derive(Deserialize)]
struct ArticlesEnvelope {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

/// Articles from a model answer that should be a bare JSON object
/// `{"articles": [...]}` but may come wrapped in a ```json fence.
pub fn parse_news_payload(text: &str) -> ServiceResult<Vec<NewsArticle>> {
    let text = text.trim();
    if let Ok(envelope) = serde_json::from_str::<ArticlesEnvelope>(text) {
        return Ok(envelope.articles);
    }
    tracing::debug!("news payload is not bare JSON, looking for a fenced block");

    let fenced = fenced_json(text).ok_or_else(|| {
        ExternalServiceError::InvalidResponse("no recognizable JSON in news payload".into())
    })?;
    serde_json::from_str::<ArticlesEnvelope>(fenced)
        .map(|e| e.articles)
        .map_err(|err| ExternalServiceError::InvalidResponse(format!("fenced news payload: {err}")))
}

fn fenced_json(text: &str) -> Option<&str> {
    let start = text.find("```json")? + "```json".len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}
