//! Dashboard state shared by all handlers.
//!
//! One process serves one client, so there is exactly one session, one
//! navigation gate and one workspace, guarded together by a single lock.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use infoco_ai::{AnalysisService, CachedNewsService, HttpAiClient, NewsService};
use infoco_auth::{CapabilitySet, Principal, SessionProvider};
use infoco_infra::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, KvSessionVault, Workspace};
use infoco_navigation::NavigationGate;

use crate::app::errors::ApiResult;
use crate::config::AppConfig;

pub type SharedKv = Arc<dyn KeyValueStore>;

pub struct DashboardState {
    pub workspace: Workspace<SharedKv>,
    pub session: SessionProvider<KvSessionVault<SharedKv>>,
    pub gate: NavigationGate,
}

impl DashboardState {
    /// Open the workspace and pick up a session persisted by an earlier run.
    pub fn open(kv: SharedKv, seed_defaults: bool) -> anyhow::Result<Self> {
        let workspace = Workspace::open(kv.clone(), seed_defaults)?;
        let mut session = SessionProvider::new(KvSessionVault::new(kv));
        session.restore_session()?;
        Ok(Self {
            workspace,
            session,
            gate: NavigationGate::new(),
        })
    }

    pub fn principal(&self) -> ApiResult<&Principal> {
        Ok(self.session.require()?)
    }

    /// Capabilities of the signed-in role under the current matrix.
    pub fn capabilities(&self) -> ApiResult<CapabilitySet> {
        let principal = self.principal()?;
        Ok(self.workspace.matrix().capabilities_for(principal.role))
    }
}

pub struct Dashboard {
    state: Mutex<DashboardState>,
    analysis: Arc<dyn AnalysisService>,
    news: Arc<dyn NewsService>,
}

impl Dashboard {
    pub fn new(
        state: DashboardState,
        analysis: Arc<dyn AnalysisService>,
        news: Arc<dyn NewsService>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            analysis,
            news,
        }
    }

    /// Wire storage and collaborators from configuration.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let kv: SharedKv = match &config.data_dir {
            Some(dir) => Arc::new(FileKeyValueStore::open(dir.clone())?),
            None => Arc::new(InMemoryKeyValueStore::new()),
        };
        let state = DashboardState::open(kv, config.seed_defaults)?;

        let client = Arc::new(HttpAiClient::new(config.ai_base_url.clone(), config.ai_timeout)?);
        let news = Arc::new(CachedNewsService::new(client.clone(), config.news_cache_ttl));
        tracing::info!(ai_base_url = %client.base_url(), "AI collaborators configured");
        Ok(Self::new(state, client, news))
    }

    pub async fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().await
    }

    pub fn analysis(&self) -> &dyn AnalysisService {
        self.analysis.as_ref()
    }

    pub fn news(&self) -> &dyn NewsService {
        self.news.as_ref()
    }
}
