use std::sync::Arc;

use crate::core::Config;
use crate::core::config::DbEngine;
use crate::db::DbService;
use crate::db::store::{DocumentStore, SurrealStore};
use crate::menu::MenuService;
use crate::utils::{AppResult, SystemClock};

#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub menu: MenuService,
}

impl ServerState {
    pub fn new(config: Config, menu: MenuService) -> Self {
        Self { config, menu }
    }

    /// State over an already opened store (tests, embedding)
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let menu = MenuService::new(store, config.menu_options(), Arc::new(SystemClock));
        Self::new(config, menu)
    }

    /// Open the configured database and build the menu layer on top
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_service = match config.db_engine {
            DbEngine::RocksDb => {
                let path = config.db_path();
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        crate::AppError::internal(format!("Failed to create work dir: {e}"))
                    })?;
                }
                DbService::new(&path).await?
            }
            DbEngine::Memory => DbService::memory().await?,
        };

        let store = Arc::new(SurrealStore::new(db_service.db));
        Ok(Self::with_store(config.clone(), store))
    }

    pub fn secure_cookies(&self) -> bool {
        self.config.is_production()
    }
}
