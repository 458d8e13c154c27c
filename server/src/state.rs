use schain_core::config::ValidatorConfig;
use schain_core::error::CoreResult;
use schain_core::fetch::{HttpFetcher, RemoteFetcher};
use schain_core::store::ResultStore;
use std::sync::Arc;

/// Builds a fetcher for one validation run. Runs on a blocking worker, so the
/// blocking HTTP client is created and dropped off the async executor.
pub type FetcherFactory =
    Arc<dyn Fn(&ValidatorConfig) -> CoreResult<Box<dyn RemoteFetcher + Send>> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ValidatorConfig>,
    pub store: Arc<ResultStore>,
    pub fetchers: FetcherFactory,
}

impl AppState {
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_fetchers(
            config,
            Arc::new(
                |cfg: &ValidatorConfig| -> CoreResult<Box<dyn RemoteFetcher + Send>> {
                    Ok(Box::new(HttpFetcher::from_config(cfg)?))
                },
            ),
        )
    }

    pub fn with_fetchers(config: ValidatorConfig, fetchers: FetcherFactory) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(ResultStore::new()),
            fetchers,
        }
    }
}
