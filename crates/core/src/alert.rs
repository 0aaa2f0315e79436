// SPDX-License-Identifier: MIT

//! Alert payload that triggers a triage run.

use serde::{Deserialize, Serialize};

/// Severity of the triggering alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Critical,
    Warning,
    Info,
}

crate::simple_display! {
    AlertKind {
        Critical => "critical",
        Warning => "warning",
        Info => "info",
    }
}

/// The alert a run was created for. Carried unchanged for the whole run,
/// including across re-analysis cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Name of the affected service (e.g. "service-a")
    pub service: String,
    pub kind: AlertKind,
    pub description: String,
    /// ISO-8601 timestamp from the alerting system
    pub raised_at: String,
    /// Channel the alert arrived on (e.g. "#alerts"), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl Alert {
    pub fn new(service: impl Into<String>, kind: AlertKind, description: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            kind,
            description: description.into(),
            raised_at: String::new(),
            channel: None,
        }
    }

    pub fn raised_at(mut self, ts: impl Into<String>) -> Self {
        self.raised_at = ts.into();
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
