use crate::domain::model::{Persona, PersonaInput};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 聯絡人的持久化介面
#[async_trait]
pub trait PersonaRepository: Send + Sync {
    async fn insert(&self, input: &PersonaInput) -> Result<Persona>;
    /// 找不到 id 時回傳 `None`
    async fn update(&self, id: i64, input: &PersonaInput) -> Result<Option<Persona>>;
    async fn find_all(&self, skip: usize, limit: usize) -> Result<Vec<Persona>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Persona>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Persona>>;
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
    /// 找不到 id 時回傳 `false`
    async fn delete_by_id(&self, id: i64) -> Result<bool>;
    async fn count(&self) -> Result<usize>;
}

/// 對遠端系統的盡力同步；所有錯誤都在實作內吞掉並記錄
#[async_trait]
pub trait PersonaSync: Send + Sync {
    async fn create_persona(&self, input: &PersonaInput) -> Option<serde_json::Value>;
    async fn update_persona(&self, id: i64, input: &PersonaInput) -> Option<serde_json::Value>;
    async fn delete_persona(&self, id: i64) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn database_path(&self) -> &str;
    fn pool_size(&self) -> u32;
    /// 同步停用時為 `None`
    fn sync_base_url(&self) -> Option<&str>;
    fn sync_personas_path(&self) -> &str;
    fn sync_timeout_seconds(&self) -> u64;
}
