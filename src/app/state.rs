use crate::adapters::{build_sync_client, initialize_pool, SqlitePersonaRepository};
use crate::core::{ConfigProvider, PersonaRepository, PersonaService, PersonaSync};
use crate::utils::error::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: PersonaService,
}

impl AppState {
    /// 依設定開啟資料庫並建立同步客戶端
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        tracing::info!("Opening database {}...", config.database_path());
        let pool = initialize_pool(config.database_path(), config.pool_size())?;
        let repository = Arc::new(SqlitePersonaRepository::new(pool));

        let sync = build_sync_client(config)?;

        Ok(Self::from_parts(repository, sync))
    }

    pub fn from_parts(repository: Arc<dyn PersonaRepository>, sync: Arc<dyn PersonaSync>) -> Self {
        Self {
            service: PersonaService::new(repository, sync),
        }
    }
}
