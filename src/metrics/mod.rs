//! In-process counters for calls to the Obras API.
//!
//! Every backend call is attributed to an [`Operation`] and classified by
//! outcome: accepted, rejected by the backend (a `detail` message), or failed
//! in transport. Form rejections that never reach the backend are counted
//! separately.

use crate::error::{ObrasApiError, ObrasApiResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A backend endpoint call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    ListEmpresas,
    CreateEmpresa,
    UpdateEmpresa,
    DeleteEmpresa,
    ListObras,
    CreateObra,
    UpdateObra,
    DeleteObra,
}

const OPERATION_COUNT: usize = 8;

impl Operation {
    pub const ALL: [Operation; OPERATION_COUNT] = [
        Self::ListEmpresas,
        Self::CreateEmpresa,
        Self::UpdateEmpresa,
        Self::DeleteEmpresa,
        Self::ListObras,
        Self::CreateObra,
        Self::UpdateObra,
        Self::DeleteObra,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ListEmpresas => "list_empresas",
            Self::CreateEmpresa => "create_empresa",
            Self::UpdateEmpresa => "update_empresa",
            Self::DeleteEmpresa => "delete_empresa",
            Self::ListObras => "list_obras",
            Self::CreateObra => "create_obra",
            Self::UpdateObra => "update_obra",
            Self::DeleteObra => "delete_obra",
        }
    }

    /// HTTP method the endpoint is called with.
    pub fn method(self) -> &'static str {
        match self {
            Self::ListEmpresas | Self::ListObras => "GET",
            Self::CreateEmpresa | Self::CreateObra => "POST",
            Self::UpdateEmpresa | Self::UpdateObra => "PUT",
            Self::DeleteEmpresa | Self::DeleteObra => "DELETE",
        }
    }

    pub fn is_write(self) -> bool {
        !matches!(self, Self::ListEmpresas | Self::ListObras)
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default)]
struct OperationCounters {
    calls: AtomicU64,
    failures: AtomicU64,
    duration_ms: AtomicU64,
}

#[derive(Debug, Default)]
struct Counters {
    operations: [OperationCounters; OPERATION_COUNT],
    backend_rejections: AtomicU64,
    connection_failures: AtomicU64,
    validation_rejections: AtomicU64,
    empresas_fetched: AtomicU64,
    obras_fetched: AtomicU64,
}

/// Shared metrics collector; clones count into the same totals.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn operation_counters(&self, operation: Operation) -> &OperationCounters {
        &self.counters.operations[operation.index()]
    }

    fn record_call(&self, operation: Operation, duration: Duration) {
        let op = self.operation_counters(operation);
        op.calls.fetch_add(1, Ordering::Relaxed);
        op.duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a call the backend accepted.
    pub fn record_success(&self, operation: Operation, duration: Duration) {
        self.record_call(operation, duration);
    }

    /// Record a failed call and classify its error.
    pub fn record_failure(&self, operation: Operation, duration: Duration, error: &ObrasApiError) {
        self.record_call(operation, duration);
        self.operation_counters(operation)
            .failures
            .fetch_add(1, Ordering::Relaxed);

        let class = match error {
            ObrasApiError::Rejected { .. } | ObrasApiError::NotFound(_) => {
                &self.counters.backend_rejections
            }
            ObrasApiError::Validation(_) => &self.counters.validation_rejections,
            ObrasApiError::Connection(_) | ObrasApiError::Timeout | ObrasApiError::JsonError(_) => {
                &self.counters.connection_failures
            }
        };
        class.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a form rejected before any request was sent.
    pub fn record_validation_rejection(&self) {
        self.counters
            .validation_rejections
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empresas_fetched(&self, count: usize) {
        self.counters
            .empresas_fetched
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_obras_fetched(&self, count: usize) {
        self.counters
            .obras_fetched
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Counters for one operation.
    pub fn operation(&self, operation: Operation) -> OperationSummary {
        let op = self.operation_counters(operation);
        OperationSummary {
            calls: op.calls.load(Ordering::Relaxed),
            failures: op.failures.load(Ordering::Relaxed),
            duration_total_ms: op.duration_ms.load(Ordering::Relaxed),
        }
    }

    fn sum(&self, f: impl Fn(OperationSummary) -> u64) -> u64 {
        Operation::ALL.iter().map(|op| f(self.operation(*op))).sum()
    }

    pub fn http_requests_total(&self) -> u64 {
        self.sum(|op| op.calls)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.sum(|op| op.failures)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.sum(|op| op.duration_total_ms)
    }

    pub fn http_duration_avg_ms(&self) -> f64 {
        let count = self.http_requests_total();
        if count == 0 {
            0.0
        } else {
            self.http_duration_total_ms() as f64 / count as f64
        }
    }

    /// Create, update and delete calls the backend accepted.
    pub fn writes_total(&self) -> u64 {
        Operation::ALL
            .iter()
            .filter(|op| op.is_write())
            .map(|op| self.operation(*op).succeeded())
            .sum()
    }

    pub fn backend_rejections_total(&self) -> u64 {
        self.counters.backend_rejections.load(Ordering::Relaxed)
    }

    pub fn connection_failures_total(&self) -> u64 {
        self.counters.connection_failures.load(Ordering::Relaxed)
    }

    pub fn validation_rejections_total(&self) -> u64 {
        self.counters.validation_rejections.load(Ordering::Relaxed)
    }

    pub fn empresas_fetched_total(&self) -> u64 {
        self.counters.empresas_fetched.load(Ordering::Relaxed)
    }

    pub fn obras_fetched_total(&self) -> u64 {
        self.counters.obras_fetched.load(Ordering::Relaxed)
    }

    /// Snapshot of every counter. Operations never called are left out.
    pub fn summary(&self) -> MetricsSummary {
        let operations = Operation::ALL
            .iter()
            .map(|op| (op.name(), self.operation(*op)))
            .filter(|(_, summary)| summary.calls > 0)
            .collect();

        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            writes_total: self.writes_total(),
            backend_rejections_total: self.backend_rejections_total(),
            connection_failures_total: self.connection_failures_total(),
            validation_rejections_total: self.validation_rejections_total(),
            empresas_fetched_total: self.empresas_fetched_total(),
            obras_fetched_total: self.obras_fetched_total(),
            operations,
        }
    }
}

/// Counters of a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationSummary {
    pub calls: u64,
    pub failures: u64,
    pub duration_total_ms: u64,
}

impl OperationSummary {
    pub fn succeeded(&self) -> u64 {
        self.calls - self.failures
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub writes_total: u64,
    pub backend_rejections_total: u64,
    pub connection_failures_total: u64,
    pub validation_rejections_total: u64,
    pub empresas_fetched_total: u64,
    pub obras_fetched_total: u64,
    pub operations: BTreeMap<&'static str, OperationSummary>,
}

/// Times one backend call and records its outcome.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
    operation: Operation,
}

impl HttpTimer {
    pub fn start(metrics: Metrics, operation: Operation) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            operation,
        }
    }

    pub fn finish<T>(self, result: &ObrasApiResult<T>) {
        let duration = self.start.elapsed();
        match result {
            Ok(_) => self.metrics.record_success(self.operation, duration),
            Err(e) => self.metrics.record_failure(self.operation, duration, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use std::thread;

    fn rejected() -> ObrasApiError {
        ObrasApiError::Rejected {
            status: 400,
            detail: "Número já cadastrado".to_string(),
        }
    }

    #[test]
    fn test_operation_table() {
        for (i, op) in Operation::ALL.iter().enumerate() {
            assert_eq!(op.index(), i);
        }
        assert_eq!(Operation::ListObras.method(), "GET");
        assert_eq!(Operation::UpdateEmpresa.method(), "PUT");
        assert!(!Operation::ListEmpresas.is_write());
        assert!(Operation::DeleteObra.is_write());
    }

    #[test]
    fn test_metrics_start_empty() {
        let metrics = Metrics::new();
        assert_eq!(metrics.http_requests_total(), 0);
        assert_eq!(metrics.http_duration_avg_ms(), 0.0);
        assert!(metrics.summary().operations.is_empty());
    }

    #[test]
    fn test_failures_are_classified() {
        let metrics = Metrics::new();
        let ms = Duration::from_millis(10);

        metrics.record_failure(Operation::CreateEmpresa, ms, &rejected());
        metrics.record_failure(
            Operation::DeleteObra,
            ms,
            &ObrasApiError::NotFound("Obra não encontrada".to_string()),
        );
        metrics.record_failure(Operation::ListObras, ms, &ObrasApiError::Timeout);

        assert_eq!(metrics.http_errors_total(), 3);
        assert_eq!(metrics.backend_rejections_total(), 2);
        assert_eq!(metrics.connection_failures_total(), 1);
        assert_eq!(metrics.validation_rejections_total(), 0);
    }

    #[test]
    fn test_writes_count_only_accepted_write_calls() {
        let metrics = Metrics::new();
        let ms = Duration::from_millis(5);

        metrics.record_success(Operation::ListEmpresas, ms);
        metrics.record_success(Operation::CreateEmpresa, ms);
        metrics.record_success(Operation::UpdateObra, ms);
        metrics.record_failure(Operation::CreateEmpresa, ms, &rejected());

        assert_eq!(metrics.writes_total(), 2);
        assert_eq!(
            metrics.operation(Operation::CreateEmpresa),
            OperationSummary {
                calls: 2,
                failures: 1,
                duration_total_ms: 10,
            }
        );
    }

    #[test]
    fn test_validation_rejections_do_not_count_as_requests() {
        let metrics = Metrics::new();
        metrics.record_validation_rejection();

        assert_eq!(metrics.validation_rejections_total(), 1);
        assert_eq!(metrics.http_requests_total(), 0);

        // A validation error reaching the call path is still classified as one
        metrics.record_failure(
            Operation::CreateObra,
            Duration::ZERO,
            &ObrasApiError::Validation(ValidationError::EmptyNome),
        );
        assert_eq!(metrics.validation_rejections_total(), 2);
    }

    #[test]
    fn test_summary_lists_called_operations() {
        let metrics = Metrics::new();
        metrics.record_success(Operation::ListObras, Duration::from_millis(100));
        metrics.record_success(Operation::ListObras, Duration::from_millis(200));
        metrics.record_obras_fetched(3);

        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 2);
        assert_eq!(summary.http_duration_avg_ms, 150.0);
        assert_eq!(summary.obras_fetched_total, 3);
        assert_eq!(summary.operations.len(), 1);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["operations"]["list_obras"]["calls"], 2);
        assert!(json["operations"].get("create_obra").is_none());
    }

    #[test]
    fn test_http_timer_records_outcome() {
        let metrics = Metrics::new();

        let timer = HttpTimer::start(metrics.clone(), Operation::ListEmpresas);
        thread::sleep(Duration::from_millis(10));
        timer.finish(&Ok::<(), ObrasApiError>(()));

        let timer = HttpTimer::start(metrics.clone(), Operation::CreateEmpresa);
        timer.finish::<()>(&Err(rejected()));

        assert_eq!(metrics.http_requests_total(), 2);
        assert_eq!(metrics.http_errors_total(), 1);
        assert_eq!(metrics.backend_rejections_total(), 1);
        assert!(metrics.http_duration_total_ms() >= 10);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let m = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        m.record_success(Operation::ListEmpresas, Duration::from_millis(1));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.http_requests_total(), 200);
    }
}
