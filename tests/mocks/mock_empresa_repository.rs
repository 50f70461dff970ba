use async_trait::async_trait;
use cadastro_obras::domain::RecordId;
use cadastro_obras::error::{ObrasApiError, ObrasApiResult};
use cadastro_obras::models::{Empresa, NewEmpresa};
use cadastro_obras::repositories::EmpresaRepository;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// In-memory empresa repository that assigns sequential ids and rejects
/// duplicate numeros the way the backend does.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockEmpresaRepository {
    empresas: Arc<Mutex<BTreeMap<u64, Empresa>>>,
    next_id: Arc<Mutex<u64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockEmpresaRepository {
    pub fn new() -> Self {
        Self {
            empresas: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a record, returning its id.
    pub fn add_empresa(&self, numero: &str, nome: &str, documento: &str) -> String {
        let id = self.allocate_id();
        let empresa = Empresa {
            id: Some(RecordId::new(id.to_string()).unwrap()),
            numero: numero.to_string(),
            nome: nome.to_string(),
            documento: documento.to_string(),
        };
        self.empresas.lock().unwrap().insert(id, empresa);
        id.to_string()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    pub fn len(&self) -> usize {
        self.empresas.lock().unwrap().len()
    }

    fn allocate_id(&self) -> u64 {
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn key(id: &RecordId) -> ObrasApiResult<u64> {
        id.as_str()
            .parse()
            .map_err(|_| ObrasApiError::NotFound("Empresa não encontrada".to_string()))
    }

    fn check_duplicate(
        empresas: &BTreeMap<u64, Empresa>,
        numero: &str,
        except: Option<u64>,
    ) -> ObrasApiResult<()> {
        let taken = empresas
            .iter()
            .any(|(id, e)| e.numero == numero && Some(*id) != except);
        if taken {
            return Err(ObrasApiError::Rejected {
                status: 400,
                detail: "Número de empresa já cadastrado".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockEmpresaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmpresaRepository for MockEmpresaRepository {
    async fn list(&self) -> ObrasApiResult<Vec<Empresa>> {
        self.track_call("list");
        Ok(self.empresas.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, empresa: &NewEmpresa) -> ObrasApiResult<Empresa> {
        self.track_call("create");

        Self::check_duplicate(&self.empresas.lock().unwrap(), empresa.numero.as_str(), None)?;

        let id = self.allocate_id();
        let created = Empresa {
            id: Some(RecordId::new(id.to_string()).unwrap()),
            numero: empresa.numero.as_str().to_string(),
            nome: empresa.nome.clone(),
            documento: empresa.documento.as_str().to_string(),
        };
        self.empresas.lock().unwrap().insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: &RecordId, empresa: &NewEmpresa) -> ObrasApiResult<Empresa> {
        self.track_call("update");

        let key = Self::key(id)?;
        let mut empresas = self.empresas.lock().unwrap();
        if !empresas.contains_key(&key) {
            return Err(ObrasApiError::NotFound("Empresa não encontrada".to_string()));
        }
        Self::check_duplicate(&empresas, empresa.numero.as_str(), Some(key))?;

        let updated = Empresa {
            id: Some(id.clone()),
            numero: empresa.numero.as_str().to_string(),
            nome: empresa.nome.clone(),
            documento: empresa.documento.as_str().to_string(),
        };
        empresas.insert(key, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &RecordId) -> ObrasApiResult<()> {
        self.track_call("delete");

        let key = Self::key(id)?;
        match self.empresas.lock().unwrap().remove(&key) {
            Some(_) => Ok(()),
            None => Err(ObrasApiError::NotFound("Empresa não encontrada".to_string())),
        }
    }
}
