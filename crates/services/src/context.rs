// SPDX-License-Identifier: MIT

//! Context collection boundary: logs, metrics, traces, and deployment
//! metadata for an alert.

use async_trait::async_trait;
use thiserror::Error;
use triage_core::{Alert, ContextBundle, LogEntry, LogLevel, TraceSpan};

/// External-service failure. The orchestrator never treats this as fatal;
/// it degrades to defaults and keeps going.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Supplies diagnostic context for an alert.
#[async_trait]
pub trait ContextService: Send + Sync {
    async fn collect(&self, alert: &Alert) -> Result<ContextBundle, ServiceError>;
}

/// Deterministic context provider returning a canned telemetry snapshot of a
/// database-connection incident. Stands in for a real CloudWatch/Datadog
/// integration in demos and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedContext;

#[async_trait]
impl ContextService for ScriptedContext {
    async fn collect(&self, alert: &Alert) -> Result<ContextBundle, ServiceError> {
        let mut bundle = ContextBundle::default();

        bundle.logs = vec![
            LogEntry {
                timestamp: "2024-01-15T14:30:45Z".to_string(),
                level: LogLevel::Error,
                service: alert.service.clone(),
                message: "ConnectionTimeout: Failed to connect to database after 30s".to_string(),
            },
            LogEntry {
                timestamp: "2024-01-15T14:30:46Z".to_string(),
                level: LogLevel::Error,
                service: alert.service.clone(),
                message: "QueryTimeoutException: Query timed out".to_string(),
            },
            LogEntry {
                timestamp: "2024-01-15T14:30:47Z".to_string(),
                level: LogLevel::Warn,
                service: alert.service.clone(),
                message: "Connection pool exhausted, current: 20/20".to_string(),
            },
        ];

        for (name, value) in [
            ("latency_p95_ms", 3500.0),
            ("latency_p99_ms", 8000.0),
            ("cpu_usage_percent", 85.2),
            ("memory_usage_percent", 92.1),
            ("db_connection_count", 20.0),
            ("db_max_connections", 20.0),
            ("request_rate_per_sec", 150.0),
        ] {
            bundle.metrics.insert(name.to_string(), value.into());
        }
        bundle.metrics.insert("error_rate".to_string(), "25%".into());

        bundle.traces = vec![
            TraceSpan {
                trace_id: "abc-123-def-456".to_string(),
                service: "api-gateway".to_string(),
                duration_ms: 8200,
                status: "error".to_string(),
                error: None,
            },
            TraceSpan {
                trace_id: "abc-123-def-456".to_string(),
                service: alert.service.clone(),
                duration_ms: 8100,
                status: "error".to_string(),
                error: Some("timeout".to_string()),
            },
        ];

        for (key, value) in [
            ("environment", "production"),
            ("region", "us-west-2"),
            ("cluster", "prod-cluster"),
            ("deployment_version", "v1.2.3"),
        ] {
            bundle.environment.insert(key.to_string(), value.to_string());
        }

        Ok(bundle)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
