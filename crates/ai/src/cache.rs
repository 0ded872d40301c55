use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::ServiceResult;
use crate::news::{NewsFeed, NewsService};

/// Serves a fetched feed until it is `ttl` old.
///
/// A failed refresh is returned to the caller and leaves the previous feed
/// in place.
pub struct CachedNewsService<S> {
    inner: S,
    ttl: Duration,
    /// Feed and the instant it goes stale.
    slot: Mutex<Option<(Instant, NewsFeed)>>,
}

impl<S: NewsService> CachedNewsService<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Last feed fetched, however old.
    pub async fn last_known(&self) -> Option<NewsFeed> {
        self.slot.lock().await.as_ref().map(|(_, feed)| feed.clone())
    }

    pub async fn invalidate(&self) {
        if let Some((expires_at, _)) = self.slot.lock().await.as_mut() {
            *expires_at = Instant::now();
        }
    }
}

#[async_trait]
impl<S: NewsService> NewsService for CachedNewsService<S> {
    async fn fetch_news(&self) -> ServiceResult<NewsFeed> {
        let mut slot = self.slot.lock().await;
        if let Some((expires_at, feed)) = slot.as_ref() {
            if Instant::now() < *expires_at {
                tracing::debug!("news cache hit");
                return Ok(feed.clone());
            }
        }
        tracing::debug!("news cache miss");

        let feed = self.inner.fetch_news().await?;
        let now = Instant::now();
        *slot = Some((now.checked_add(self.ttl).unwrap_or(now), feed.clone()));
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::error::ExternalServiceError;
    use crate::news::NewsArticle;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl NewsService for Counting {
        async fn fetch_news(&self) -> ServiceResult<NewsFeed> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(ExternalServiceError::Timeout);
            }
            Ok(NewsFeed {
                articles: vec![NewsArticle {
                    title: format!("n{n}"),
                    summary: String::new(),
                    url: "https://example.org".into(),
                    source_title: String::new(),
                }],
                sources: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn fresh_feeds_are_served_from_cache() {
        let inner = Arc::new(Counting::default());
        let cache = CachedNewsService::new(inner.clone(), Duration::from_secs(3600));

        let a = cache.fetch_news().await.unwrap();
        let b = cache.fetch_news().await.unwrap();
        assert_eq!(a, b);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_feed() {
        let inner = Arc::new(Counting::default());
        let cache = CachedNewsService::new(inner.clone(), Duration::from_secs(3600));
        let first = cache.fetch_news().await.unwrap();

        inner.fail.store(true, Ordering::SeqCst);
        cache.invalidate().await;
        assert_eq!(cache.fetch_news().await, Err(ExternalServiceError::Timeout));
        assert_eq!(cache.last_known().await, Some(first));
    }
}
