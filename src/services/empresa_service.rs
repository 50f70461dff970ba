//! Empresa service layer.
//!
//! Validates company forms and forwards them to the repository.

use crate::domain::RecordId;
use crate::error::{ObrasApiError, ObrasApiResult};
use crate::models::{Empresa, EmpresaForm};
use crate::repositories::EmpresaRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Empresa service trait for business operations.
#[async_trait]
pub trait EmpresaService: Send + Sync {
    /// List every registered empresa.
    async fn list_empresas(&self) -> ObrasApiResult<Vec<Empresa>>;

    /// Validate and register a new empresa.
    async fn register_empresa(&self, form: EmpresaForm) -> ObrasApiResult<Empresa>;

    /// Validate and replace an existing empresa.
    async fn update_empresa(&self, id: &str, form: EmpresaForm) -> ObrasApiResult<Empresa>;

    /// Delete an empresa.
    async fn delete_empresa(&self, id: &str) -> ObrasApiResult<()>;
}

/// Default implementation of EmpresaService.
pub struct EmpresaServiceImpl {
    repo: Arc<dyn EmpresaRepository>,
}

impl EmpresaServiceImpl {
    pub fn new(repo: Arc<dyn EmpresaRepository>) -> Self {
        Self { repo }
    }
}

fn parse_id(id: &str) -> ObrasApiResult<RecordId> {
    Ok(RecordId::new(id)?)
}

#[async_trait]
impl EmpresaService for EmpresaServiceImpl {
    async fn list_empresas(&self) -> ObrasApiResult<Vec<Empresa>> {
        self.repo.list().await
    }

    async fn register_empresa(&self, form: EmpresaForm) -> ObrasApiResult<Empresa> {
        let new = form.validate().map_err(|e| {
            tracing::warn!("Empresa form rejected: {}", e);
            ObrasApiError::Validation(e)
        })?;

        let created = self.repo.create(&new).await?;
        tracing::info!(
            "Empresa registered: numero={} documento={}",
            created.numero,
            created.documento_formatado()
        );
        Ok(created)
    }

    async fn update_empresa(&self, id: &str, form: EmpresaForm) -> ObrasApiResult<Empresa> {
        let id = parse_id(id)?;
        let new = form.validate().map_err(|e| {
            tracing::warn!("Empresa form rejected for {}: {}", id, e);
            ObrasApiError::Validation(e)
        })?;

        self.repo.update(&id, &new).await
    }

    async fn delete_empresa(&self, id: &str) -> ObrasApiResult<()> {
        let id = parse_id(id)?;
        self.repo.delete(&id).await?;
        tracing::info!("Empresa {} deleted", id);
        Ok(())
    }
}
