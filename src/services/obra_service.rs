//! Obra service layer.

use crate::domain::RecordId;
use crate::error::{ObrasApiError, ObrasApiResult};
use crate::models::{Obra, ObraForm};
use crate::repositories::ObraRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Obra service trait for business operations.
#[async_trait]
pub trait ObraService: Send + Sync {
    /// List the obras of one empresa.
    async fn list_obras(&self, empresa_id: &str) -> ObrasApiResult<Vec<Obra>>;

    /// Validate and register an obra under an empresa.
    async fn register_obra(&self, empresa_id: &str, form: ObraForm) -> ObrasApiResult<Obra>;

    /// Validate and replace an existing obra.
    async fn update_obra(&self, id: &str, form: ObraForm) -> ObrasApiResult<Obra>;

    /// Delete an obra.
    async fn delete_obra(&self, id: &str) -> ObrasApiResult<()>;
}

/// Default implementation of ObraService.
pub struct ObraServiceImpl {
    repo: Arc<dyn ObraRepository>,
}

impl ObraServiceImpl {
    pub fn new(repo: Arc<dyn ObraRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ObraService for ObraServiceImpl {
    async fn list_obras(&self, empresa_id: &str) -> ObrasApiResult<Vec<Obra>> {
        let empresa_id = RecordId::new(empresa_id)?;
        self.repo.list_for_empresa(&empresa_id).await
    }

    async fn register_obra(&self, empresa_id: &str, form: ObraForm) -> ObrasApiResult<Obra> {
        let empresa_id = RecordId::new(empresa_id)?;
        let new = form.validate().map_err(|e| {
            tracing::warn!("Obra form rejected: {}", e);
            ObrasApiError::Validation(e)
        })?;

        let created = self.repo.create(&empresa_id, &new).await?;
        tracing::info!(
            "Obra registered: numero={} empresa={}",
            created.numero,
            empresa_id
        );
        Ok(created)
    }

    async fn update_obra(&self, id: &str, form: ObraForm) -> ObrasApiResult<Obra> {
        let id = RecordId::new(id)?;
        let new = form.validate().map_err(|e| {
            tracing::warn!("Obra form rejected for {}: {}", id, e);
            ObrasApiError::Validation(e)
        })?;

        self.repo.update(&id, &new).await
    }

    async fn delete_obra(&self, id: &str) -> ObrasApiResult<()> {
        let id = RecordId::new(id)?;
        self.repo.delete(&id).await?;
        tracing::info!("Obra {} deleted", id);
        Ok(())
    }
}
