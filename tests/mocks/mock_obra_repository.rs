use async_trait::async_trait;
use cadastro_obras::domain::RecordId;
use cadastro_obras::error::{ObrasApiError, ObrasApiResult};
use cadastro_obras::models::{NewObra, Obra};
use cadastro_obras::repositories::ObraRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory obra repository.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockObraRepository {
    obras: Arc<Mutex<Vec<Obra>>>,
    next_id: Arc<Mutex<u64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockObraRepository {
    pub fn new() -> Self {
        Self {
            obras: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(100)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn build(id: RecordId, empresa_id: Option<RecordId>, obra: &NewObra) -> Obra {
        Obra {
            id: Some(id),
            empresa_id,
            numero: obra.numero.as_str().to_string(),
            nome: obra.nome.clone(),
            bloco: obra.bloco.as_str().to_string(),
            endereco: obra.endereco.clone(),
        }
    }
}

impl Default for MockObraRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObraRepository for MockObraRepository {
    async fn list_for_empresa(&self, empresa_id: &RecordId) -> ObrasApiResult<Vec<Obra>> {
        self.track_call("list_for_empresa");

        let obras = self.obras.lock().unwrap();
        Ok(obras
            .iter()
            .filter(|o| o.empresa_id.as_ref() == Some(empresa_id))
            .cloned()
            .collect())
    }

    async fn create(&self, empresa_id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra> {
        self.track_call("create");

        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        let created = Self::build(
            RecordId::new(id.to_string()).unwrap(),
            Some(empresa_id.clone()),
            obra,
        );
        self.obras.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra> {
        self.track_call("update");

        let mut obras = self.obras.lock().unwrap();
        let existing = obras
            .iter_mut()
            .find(|o| o.id.as_ref() == Some(id))
            .ok_or_else(|| ObrasApiError::NotFound("Obra não encontrada".to_string()))?;

        *existing = Self::build(id.clone(), existing.empresa_id.clone(), obra);
        Ok(existing.clone())
    }

    async fn delete(&self, id: &RecordId) -> ObrasApiResult<()> {
        self.track_call("delete");

        let mut obras = self.obras.lock().unwrap();
        let before = obras.len();
        obras.retain(|o| o.id.as_ref() != Some(id));
        if obras.len() == before {
            return Err(ObrasApiError::NotFound("Obra não encontrada".to_string()));
        }
        Ok(())
    }
}
