use crate::domain::model::{Persona, PersonaInput};
use crate::domain::ports::{PersonaRepository, PersonaSync};
use crate::utils::error::{AgendaError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const MAX_PAGE_SIZE: usize = 1000;

/// 聯絡人的業務邏輯：先寫本地資料庫，新建立的再盡力同步到遠端
#[derive(Clone)]
pub struct PersonaService {
    repository: Arc<dyn PersonaRepository>,
    sync: Arc<dyn PersonaSync>,
}

impl PersonaService {
    pub fn new(repository: Arc<dyn PersonaRepository>, sync: Arc<dyn PersonaSync>) -> Self {
        Self { repository, sync }
    }

    pub async fn create(&self, input: PersonaInput) -> Result<Persona> {
        let input = input.normalized();
        input.validate()?;

        if self.repository.exists_by_email(&input.email).await? {
            return Err(AgendaError::DuplicateEmail { email: input.email });
        }

        let persona = self.repository.insert(&input).await?;
        tracing::info!("Persona {} created ({})", persona.id, persona.email);

        // 遠端 id 與本地不同，只同步新建立的資料；結果不影響本地建立
        if self.sync.create_persona(&persona.to_input()).await.is_none() {
            tracing::debug!("Persona {} was not synced to remote agenda", persona.id);
        }

        Ok(persona)
    }

    pub async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Persona>> {
        self.repository
            .find_all(skip, limit.min(MAX_PAGE_SIZE))
            .await
    }

    /// 單一查詢取回全部，列表頁使用
    pub async fn list_all(&self) -> Result<Vec<Persona>> {
        self.repository.find_all(0, usize::MAX).await
    }

    pub async fn get(&self, id: i64) -> Result<Persona> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AgendaError::NotFound { id })
    }

    pub async fn find(&self, id: i64) -> Result<Option<Persona>> {
        self.repository.find_by_id(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Persona>> {
        self.repository
            .find_by_email(&email.trim().to_lowercase())
            .await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        self.repository
            .exists_by_email(&email.trim().to_lowercase())
            .await
    }

    /// 覆寫全部欄位；不同步到遠端
    pub async fn update(&self, id: i64, input: PersonaInput) -> Result<Persona> {
        let input = input.normalized();
        input.validate()?;

        let current = self.get(id).await?;
        if current.email != input.email && self.repository.exists_by_email(&input.email).await? {
            return Err(AgendaError::DuplicateEmail { email: input.email });
        }

        let persona = self
            .repository
            .update(id, &input)
            .await?
            .ok_or(AgendaError::NotFound { id })?;
        tracing::info!("Persona {} updated", id);
        Ok(persona)
    }

    /// 不同步到遠端
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete_by_id(id).await? {
            return Err(AgendaError::NotFound { id });
        }
        tracing::info!("Persona {} deleted", id);
        Ok(())
    }

    pub async fn count(&self) -> Result<usize> {
        self.repository.count().await
    }
}
