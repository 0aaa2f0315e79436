// SPDX-License-Identifier: MIT

//! Diagnostic context collected for an alert.
//!
//! One bundle is collected per analysis cycle and overwritten when the user
//! requests re-analysis. A failed collection degrades to an empty bundle
//! rather than failing the run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Log severity as reported by the telemetry provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

crate::simple_display! {
    LogLevel {
        Error => "ERROR",
        Warn => "WARN",
        Info => "INFO",
        Debug => "DEBUG",
    }
}

/// A single log line from the affected service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub service: String,
    pub message: String,
}

/// One span from a distributed trace touching the incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSpan {
    pub trace_id: String,
    pub service: String,
    pub duration_ms: u64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Metric values are numeric where possible but providers also report
/// pre-formatted strings (e.g. "25%").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric value, if this metric has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

/// Everything the context service gathered for one analysis cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextBundle {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<LogEntry>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, MetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traces: Vec<TraceSpan>,
    /// Deployment metadata (environment, region, cluster, version)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

impl ContextBundle {
    /// True when nothing was collected (the degraded-collection case).
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
            && self.metrics.is_empty()
            && self.traces.is_empty()
            && self.environment.is_empty()
    }

    /// Look up a metric's numeric value by name.
    pub fn metric_number(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).and_then(MetricValue::as_number)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
