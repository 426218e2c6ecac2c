use crate::domain::model::PersonaInput;
use crate::domain::ports::{ConfigProvider, PersonaSync};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// 把新建立的聯絡人送到另一套 agenda 服務
///
/// 每個方法只發一個請求，不重試；任何失敗都記錄後轉成 `None` / `false`。
#[derive(Debug, Clone)]
pub struct RemoteAgendaClient {
    client: Client,
    base_url: String,
    personas_path: String,
}

impl RemoteAgendaClient {
    pub fn new(base_url: &str, personas_path: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            personas_path: personas_path.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.personas_path)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    async fn read_json(response: reqwest::Response) -> Option<serde_json::Value> {
        match response.json::<serde_json::Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("✗ Remote agenda returned an unreadable body: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl PersonaSync for RemoteAgendaClient {
    async fn create_persona(&self, input: &PersonaInput) -> Option<serde_json::Value> {
        let url = self.collection_url();
        tracing::debug!("Syncing new persona {} to {}", input.email, url);

        let response = match self.client.post(&url).json(input).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("✗ Error creating persona {} in remote agenda: {}", input.email, e);
                return None;
            }
        };

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                tracing::info!("✓ Persona {} created in remote agenda", input.email);
                Self::read_json(response).await
            }
            status => {
                tracing::warn!(
                    "✗ Remote agenda rejected persona {} with status {}",
                    input.email,
                    status
                );
                None
            }
        }
    }

    async fn update_persona(&self, id: i64, input: &PersonaInput) -> Option<serde_json::Value> {
        let url = self.item_url(id);
        tracing::debug!("Syncing update of persona {} to {}", id, url);

        let response = match self.client.put(&url).json(input).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("✗ Error updating persona {} in remote agenda: {}", id, e);
                return None;
            }
        };

        if response.status() == StatusCode::OK {
            tracing::info!("✓ Persona {} updated in remote agenda", id);
            Self::read_json(response).await
        } else {
            tracing::warn!(
                "✗ Remote agenda rejected update of persona {} with status {}",
                id,
                response.status()
            );
            None
        }
    }

    async fn delete_persona(&self, id: i64) -> bool {
        let url = self.item_url(id);
        tracing::debug!("Syncing deletion of persona {} to {}", id, url);

        match self.client.delete(&url).send().await {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => {
                tracing::info!("✓ Persona {} deleted in remote agenda", id);
                true
            }
            Ok(response) => {
                tracing::warn!(
                    "✗ Remote agenda rejected deletion of persona {} with status {}",
                    id,
                    response.status()
                );
                false
            }
            Err(e) => {
                tracing::warn!("✗ Error deleting persona {} in remote agenda: {}", id, e);
                false
            }
        }
    }
}

/// 同步停用時使用，不做任何 I/O
#[derive(Debug, Clone, Default)]
pub struct NoopSync;

#[async_trait]
impl PersonaSync for NoopSync {
    async fn create_persona(&self, input: &PersonaInput) -> Option<serde_json::Value> {
        tracing::debug!("Sync disabled, not sending persona {}", input.email);
        None
    }

    async fn update_persona(&self, _id: i64, _input: &PersonaInput) -> Option<serde_json::Value> {
        None
    }

    async fn delete_persona(&self, _id: i64) -> bool {
        false
    }
}

/// 依設定建立同步客戶端
pub fn build_sync_client<C: ConfigProvider>(config: &C) -> Result<Arc<dyn PersonaSync>> {
    match config.sync_base_url() {
        Some(base_url) => {
            tracing::info!(
                "🔄 Remote sync enabled: {}{}",
                base_url,
                config.sync_personas_path()
            );
            let client = RemoteAgendaClient::new(
                base_url,
                config.sync_personas_path(),
                Duration::from_secs(config.sync_timeout_seconds()),
            )?;
            Ok(Arc::new(client))
        }
        None => {
            tracing::info!("Remote sync disabled");
            Ok(Arc::new(NoopSync))
        }
    }
}
