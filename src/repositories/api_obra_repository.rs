use crate::client::AsyncObrasClient;
use crate::domain::RecordId;
use crate::error::ObrasApiResult;
use crate::models::{NewObra, Obra};
use crate::repositories::traits::ObraRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Obra repository backed by the Obras API.
pub struct ApiObraRepository {
    client: Arc<dyn AsyncObrasClient>,
}

impl ApiObraRepository {
    pub fn new(client: Arc<dyn AsyncObrasClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObraRepository for ApiObraRepository {
    async fn list_for_empresa(&self, empresa_id: &RecordId) -> ObrasApiResult<Vec<Obra>> {
        self.client.list_obras(empresa_id).await
    }

    async fn create(&self, empresa_id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra> {
        self.client.create_obra(empresa_id, obra).await
    }

    async fn update(&self, id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra> {
        self.client.update_obra(id, obra).await
    }

    async fn delete(&self, id: &RecordId) -> ObrasApiResult<()> {
        self.client.delete_obra(id).await
    }
}
