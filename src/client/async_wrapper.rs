//! Async wrapper around the synchronous ObrasClient.
//!
//! HTTP calls run on tokio's blocking thread pool via `spawn_blocking`, so the
//! async runtime serving MCP requests is never blocked.

use crate::client::ObrasClient;
use crate::domain::RecordId;
use crate::error::{ObrasApiError, ObrasApiResult};
use crate::models::{Empresa, NewEmpresa, NewObra, Obra};
use async_trait::async_trait;
use std::sync::Arc;

/// Async version of every ObrasClient operation.
#[async_trait]
pub trait AsyncObrasClient: Send + Sync {
    async fn list_empresas(&self) -> ObrasApiResult<Vec<Empresa>>;
    async fn create_empresa(&self, empresa: &NewEmpresa) -> ObrasApiResult<Empresa>;
    async fn update_empresa(&self, id: &RecordId, empresa: &NewEmpresa)
        -> ObrasApiResult<Empresa>;
    async fn delete_empresa(&self, id: &RecordId) -> ObrasApiResult<()>;

    async fn list_obras(&self, empresa_id: &RecordId) -> ObrasApiResult<Vec<Obra>>;
    async fn create_obra(&self, empresa_id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra>;
    async fn update_obra(&self, id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra>;
    async fn delete_obra(&self, id: &RecordId) -> ObrasApiResult<()>;
}

/// Runs ObrasClient calls on the blocking thread pool.
#[derive(Clone)]
pub struct AsyncObrasClientImpl {
    client: Arc<ObrasClient>,
}

impl AsyncObrasClientImpl {
    pub fn new(client: ObrasClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Access the wrapped client (for metrics).
    pub fn inner(&self) -> &ObrasClient {
        &self.client
    }
}

fn join_error(e: tokio::task::JoinError) -> ObrasApiError {
    ObrasApiError::Connection(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncObrasClient for AsyncObrasClientImpl {
    async fn list_empresas(&self) -> ObrasApiResult<Vec<Empresa>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_empresas())
            .await
            .map_err(join_error)?
    }

    async fn create_empresa(&self, empresa: &NewEmpresa) -> ObrasApiResult<Empresa> {
        let client = self.client.clone();
        let empresa = empresa.clone();

        tokio::task::spawn_blocking(move || client.create_empresa(&empresa))
            .await
            .map_err(join_error)?
    }

    async fn update_empresa(
        &self,
        id: &RecordId,
        empresa: &NewEmpresa,
    ) -> ObrasApiResult<Empresa> {
        let client = self.client.clone();
        let id = id.clone();
        let empresa = empresa.clone();

        tokio::task::spawn_blocking(move || client.update_empresa(&id, &empresa))
            .await
            .map_err(join_error)?
    }

    async fn delete_empresa(&self, id: &RecordId) -> ObrasApiResult<()> {
        let client = self.client.clone();
        let id = id.clone();

        tokio::task::spawn_blocking(move || client.delete_empresa(&id))
            .await
            .map_err(join_error)?
    }

    async fn list_obras(&self, empresa_id: &RecordId) -> ObrasApiResult<Vec<Obra>> {
        let client = self.client.clone();
        let empresa_id = empresa_id.clone();

        tokio::task::spawn_blocking(move || client.list_obras(&empresa_id))
            .await
            .map_err(join_error)?
    }

    async fn create_obra(&self, empresa_id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra> {
        let client = self.client.clone();
        let empresa_id = empresa_id.clone();
        let obra = obra.clone();

        tokio::task::spawn_blocking(move || client.create_obra(&empresa_id, &obra))
            .await
            .map_err(join_error)?
    }

    async fn update_obra(&self, id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra> {
        let client = self.client.clone();
        let id = id.clone();
        let obra = obra.clone();

        tokio::task::spawn_blocking(move || client.update_obra(&id, &obra))
            .await
            .map_err(join_error)?
    }

    async fn delete_obra(&self, id: &RecordId) -> ObrasApiResult<()> {
        let client = self.client.clone();
        let id = id.clone();

        tokio::task::spawn_blocking(move || client.delete_obra(&id))
            .await
            .map_err(join_error)?
    }
}
