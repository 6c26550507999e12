use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::schema::ModelRegistry;

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    /// Wire models derived from the entity schemas at startup, served
    /// read-only for API documentation.
    pub models: ModelRegistry,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        // an unmappable field kind aborts startup, not a request
        let models = ModelRegistry::build()?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            models,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
