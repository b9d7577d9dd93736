//! Everything a front end needs, built once at startup.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::dashboard::DashboardService;
use crate::resources::{BorrowingStore, DeviceStore, PostStore, UserStore};
use crate::session::{FileStorage, SessionStorage, SessionStore};

/// Shared API client, the rehydrated session and the resource stores.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: SessionStore,
    pub devices: DeviceStore,
    pub borrowings: BorrowingStore,
    pub posts: PostStore,
    pub users: UserStore,
    pub dashboard: DashboardService,
}

impl AppContext {
    pub fn new(config: &Config, storage: Arc<dyn SessionStorage>) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api)?;
        tracing::debug!(base_url = %api.base_url(), "API client ready");
        Ok(Self {
            session: SessionStore::restore(api.clone(), storage),
            devices: DeviceStore::new(api.clone()),
            borrowings: BorrowingStore::new(api.clone()),
            posts: PostStore::new(api.clone()),
            users: UserStore::new(api.clone()),
            dashboard: DashboardService::new(api.clone(), &config.polling),
            api,
        })
    }

    /// Context persisting the session under the configured directory.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let storage = FileStorage::new(config.session.resolved_dir());
        Self::new(config, Arc::new(storage))
    }
}
