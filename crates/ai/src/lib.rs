//! `infoco-ai`
//!
//! Boundary to the generative-AI backend: free-text analysis of a data
//! snapshot and an aggregated news feed.
//!
//! Nothing here reads or writes dashboard collections. Callers hand in a
//! JSON snapshot and get text or articles back; a failure is reported as an
//! [`ExternalServiceError`] and never leaves partial state behind.

pub mod analysis;
pub mod cache;
pub mod error;
pub mod http;
pub mod news;

pub use analysis::{AnalysisRequest, AnalysisResponse, AnalysisService};
pub use cache::CachedNewsService;
pub use error::{ExternalServiceError, ServiceResult};
pub use http::HttpAiClient;
pub use news::{parse_news_payload, GroundingSource, NewsArticle, NewsFeed, NewsService, WebSource};
