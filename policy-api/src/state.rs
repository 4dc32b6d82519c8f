//! Application state for the API server

use std::sync::Arc;

use policy_store::{
    AppPolicyRepository, AppPolicyStore, DashboardRepository, DashboardStore, StoreResult,
};

use crate::config::{ServerConfig, DEFAULT_MAX_PAGE_SIZE};

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Policy dashboard data
    pub dashboard: Arc<dyn DashboardRepository>,
    /// The application's own policies
    pub app_policies: Arc<dyn AppPolicyRepository>,
    /// Upper bound on the `size` query parameter
    pub max_page_size: usize,
    /// API version
    pub version: String,
}

impl AppState {
    pub fn new(
        dashboard: Arc<dyn DashboardRepository>,
        app_policies: Arc<dyn AppPolicyRepository>,
    ) -> Self {
        Self {
            dashboard,
            app_policies,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Load both file stores from the configured data directory
    pub async fn open(config: &ServerConfig) -> StoreResult<Self> {
        let dashboard = Arc::new(DashboardStore::open(&config.data_dir).await?);
        let app_policies = Arc::new(AppPolicyStore::open(&config.data_dir).await?);

        Ok(Self::new(dashboard, app_policies).with_max_page_size(config.max_page_size))
    }

    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }
}
