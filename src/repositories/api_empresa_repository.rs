use crate::client::AsyncObrasClient;
use crate::domain::RecordId;
use crate::error::ObrasApiResult;
use crate::models::{Empresa, NewEmpresa};
use crate::repositories::traits::EmpresaRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Empresa repository backed by the Obras API.
///
/// Delegates every operation to the AsyncObrasClient.
pub struct ApiEmpresaRepository {
    client: Arc<dyn AsyncObrasClient>,
}

impl ApiEmpresaRepository {
    pub fn new(client: Arc<dyn AsyncObrasClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmpresaRepository for ApiEmpresaRepository {
    async fn list(&self) -> ObrasApiResult<Vec<Empresa>> {
        self.client.list_empresas().await
    }

    async fn create(&self, empresa: &NewEmpresa) -> ObrasApiResult<Empresa> {
        self.client.create_empresa(empresa).await
    }

    async fn update(&self, id: &RecordId, empresa: &NewEmpresa) -> ObrasApiResult<Empresa> {
        self.client.update_empresa(id, empresa).await
    }

    async fn delete(&self, id: &RecordId) -> ObrasApiResult<()> {
        self.client.delete_empresa(id).await
    }
}
