//! HTTP client for the Obras REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The backend is an external collaborator exposing
//! `empresas` and their `obras`; this client only maps its JSON and error shapes.

mod async_wrapper;
pub use async_wrapper::{AsyncObrasClient, AsyncObrasClientImpl};

use crate::config::Config;
use crate::domain::RecordId;
use crate::error::{ObrasApiError, ObrasApiResult};
use crate::metrics::{HttpTimer, Metrics, Operation};
use crate::models::{Empresa, NewEmpresa, NewObra, Obra};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client for the Obras API.
///
/// Uses `ureq` for synchronous requests; wrap it in [`AsyncObrasClientImpl`]
/// to call it from async code.
#[derive(Clone)]
pub struct ObrasClient {
    /// Base URL for the Obras API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ObrasClient {
    /// Create a new ObrasClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.obras_api_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create an ObrasClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::build(base_url, Duration::from_secs(10))
    }

    fn build(base_url: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute one request, timing it under `operation` and mapping failures.
    fn execute(
        &self,
        operation: Operation,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ObrasApiResult<ureq::Response> {
        let method = operation.method();
        let url = self.build_url(path);
        tracing::debug!("{} {}", method, url);

        let timer = HttpTimer::start(self.metrics.clone(), operation);
        let request = self
            .agent
            .request(method, &url)
            .set("Accept", "application/json");

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(Self::map_error);
        timer.finish(&result);

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
            }
            Err(error) => {
                tracing::error!("{} {} - Error: {:?}", method, url, error);
            }
        }
        result
    }

    /// Map a ureq error to an ObrasApiError.
    ///
    /// Only bodies shaped `{"detail": "<message>"}` count as backend rejections;
    /// any other error shape is reported as a connection failure.
    fn map_error(error: ureq::Error) -> ObrasApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                match Self::extract_detail(&body) {
                    Some(detail) if code == 404 => ObrasApiError::NotFound(detail),
                    Some(detail) => ObrasApiError::Rejected {
                        status: code,
                        detail,
                    },
                    None => ObrasApiError::Connection(format!(
                        "status {} without error detail",
                        code
                    )),
                }
            }
            ureq::Error::Transport(transport) => {
                let message = transport.to_string();
                if transport.kind() == ureq::ErrorKind::Io && message.contains("timed out") {
                    ObrasApiError::Timeout
                } else {
                    ObrasApiError::Connection(message)
                }
            }
        }
    }

    fn extract_detail(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.detail)
            .filter(|d| !d.trim().is_empty())
    }

    fn read_body(response: ureq::Response) -> ObrasApiResult<String> {
        response
            .into_string()
            .map_err(|e| ObrasApiError::Connection(e.to_string()))
    }

    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> ObrasApiResult<T> {
        let body = Self::read_body(response)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Parse a list endpoint body. Anything other than a JSON array counts as
    /// an empty list.
    fn parse_list<T: DeserializeOwned>(body: &str, what: &str) -> ObrasApiResult<Vec<T>> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if value.is_array() {
            Ok(serde_json::from_value(value)?)
        } else {
            tracing::warn!("Expected a list of {}, got {}; treating as empty", what, value);
            Ok(Vec::new())
        }
    }

    fn empresa_path(id: &RecordId) -> String {
        format!("/empresas/{}", urlencoding::encode(id.as_str()))
    }

    fn obras_of_empresa_path(empresa_id: &RecordId) -> String {
        format!("/empresas/{}/obras", urlencoding::encode(empresa_id.as_str()))
    }

    fn obra_path(id: &RecordId) -> String {
        format!("/obras/{}", urlencoding::encode(id.as_str()))
    }

    // ========================= Empresa Operations =========================

    /// List every registered empresa.
    pub fn list_empresas(&self) -> ObrasApiResult<Vec<Empresa>> {
        let response = self.execute(Operation::ListEmpresas, "/empresas", None)?;
        let body = Self::read_body(response)?;
        let empresas: Vec<Empresa> = Self::parse_list(&body, "empresas")?;

        self.metrics.record_empresas_fetched(empresas.len());
        Ok(empresas)
    }

    /// Register a new empresa.
    pub fn create_empresa(&self, empresa: &NewEmpresa) -> ObrasApiResult<Empresa> {
        tracing::info!("Creating empresa numero {}", empresa.numero);

        let body = serde_json::to_value(empresa)?;
        let response = self.execute(Operation::CreateEmpresa, "/empresas", Some(&body))?;
        Self::read_json(response)
    }

    /// Replace an existing empresa.
    pub fn update_empresa(&self, id: &RecordId, empresa: &NewEmpresa) -> ObrasApiResult<Empresa> {
        let body = serde_json::to_value(empresa)?;
        let response = self.execute(
            Operation::UpdateEmpresa,
            &Self::empresa_path(id),
            Some(&body),
        )?;
        Self::read_json(response)
    }

    /// Delete an empresa.
    pub fn delete_empresa(&self, id: &RecordId) -> ObrasApiResult<()> {
        self.execute(Operation::DeleteEmpresa, &Self::empresa_path(id), None)?;
        Ok(())
    }

    // ========================= Obra Operations =========================

    /// List the obras of one empresa.
    pub fn list_obras(&self, empresa_id: &RecordId) -> ObrasApiResult<Vec<Obra>> {
        let response = self.execute(
            Operation::ListObras,
            &Self::obras_of_empresa_path(empresa_id),
            None,
        )?;
        let body = Self::read_body(response)?;
        let obras: Vec<Obra> = Self::parse_list(&body, "obras")?;

        self.metrics.record_obras_fetched(obras.len());
        Ok(obras)
    }

    /// Register a new obra under an empresa.
    pub fn create_obra(&self, empresa_id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra> {
        tracing::info!(
            "Creating obra numero {} for empresa {}",
            obra.numero,
            empresa_id
        );

        let body = serde_json::to_value(obra)?;
        let response = self.execute(
            Operation::CreateObra,
            &Self::obras_of_empresa_path(empresa_id),
            Some(&body),
        )?;
        Self::read_json(response)
    }

    /// Replace an existing obra.
    pub fn update_obra(&self, id: &RecordId, obra: &NewObra) -> ObrasApiResult<Obra> {
        let body = serde_json::to_value(obra)?;
        let response = self.execute(Operation::UpdateObra, &Self::obra_path(id), Some(&body))?;
        Self::read_json(response)
    }

    /// Delete an obra.
    pub fn delete_obra(&self, id: &RecordId) -> ObrasApiResult<()> {
        self.execute(Operation::DeleteObra, &Self::obra_path(id), None)?;
        Ok(())
    }
}
