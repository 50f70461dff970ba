use crate::domain::RecordId;
use crate::error::ObrasApiResult;
use crate::models::{Empresa, NewEmpresa, NewObra, Obra};
use async_trait::async_trait;

/// Repository for managing empresas.
///
/// Abstracts where company records live so services can be exercised
/// against the API client or an in-memory mock.
#[async_trait]
pub trait EmpresaRepository: Send + Sync {
    /// Retrieve every empresa.
    async fn list(&self) -> ObrasApiResult<Vec<Empresa>>;

    /// Create a new empresa.
    async fn create(&self, empresa: &NewEmpresa) -> ObrasApiResult<Empresa>;

    /// Update an existing empresa.
    async fn update(&self, id: &RecordId, empresa: &NewEmpresa) -> ObrasApiResult<Empresa>;

    /// Delete an empresa.
    async fn delete(&self, id: &RecordId) -> ObrasApiResult<()>;
}

/// Repository for managing obras.
#[async_trait]
pub trait ObraRepository: Send + Sync {
    /// Get the obras of one empresa.
    async fn list_for_empresa(&self, empresa_id: &RecordId) -> ObrasApiResult<Vec<Obra>>;

    /// Create a new obra under an empresa.
    async fn create(&self, empresa_id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra>;

    /// Update an existing obra.
    async fn update(&self, id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra>;

    /// Delete an obra.
    async fn delete(&self, id: &RecordId) -> ObrasApiResult<()>;
}
