// SPDX-License-Identifier: MIT

//! Fake services and actions for tests in other crates.

use crate::analysis::{AnalysisError, AnalysisService};
use crate::context::{ContextService, ServiceError};
use crate::registry::{Action, Params};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use triage_core::{Alert, ContextBundle, RemediationPlan};

/// Context service that always fails, for degraded-collection paths.
#[derive(Debug, Clone, Default)]
pub struct FailingContext;

#[async_trait]
impl ContextService for FailingContext {
    async fn collect(&self, _alert: &Alert) -> Result<ContextBundle, ServiceError> {
        Err(ServiceError::Unavailable("telemetry backend down".to_string()))
    }
}

/// How a [`FakeAnalysis`] should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisFailure {
    None,
    RootCauseUnavailable,
    PlansUnavailable,
    PlansMalformed,
}

/// Analysis service with scriptable failure modes.
#[derive(Clone)]
pub struct FakeAnalysis {
    pub failure: AnalysisFailure,
    pub plans: Vec<RemediationPlan>,
}

impl FakeAnalysis {
    pub fn with_plans(plans: Vec<RemediationPlan>) -> Self {
        Self { failure: AnalysisFailure::None, plans }
    }

    pub fn failing(failure: AnalysisFailure) -> Self {
        Self { failure, plans: Vec::new() }
    }
}

#[async_trait]
impl AnalysisService for FakeAnalysis {
    async fn analyze_root_cause(
        &self,
        _context: &ContextBundle,
        alert: &Alert,
    ) -> Result<String, ServiceError> {
        if self.failure == AnalysisFailure::RootCauseUnavailable {
            return Err(ServiceError::Unavailable("model endpoint 503".to_string()));
        }
        Ok(format!("fake root cause for {}", alert.service))
    }

    async fn generate_plans(
        &self,
        _root_cause: &str,
        _context: &ContextBundle,
    ) -> Result<Vec<RemediationPlan>, AnalysisError> {
        match self.failure {
            AnalysisFailure::PlansUnavailable => {
                Err(AnalysisError::Unavailable("model endpoint 503".to_string()))
            }
            AnalysisFailure::PlansMalformed => {
                Err(AnalysisError::Parse("expected key 'actions'".to_string()))
            }
            _ => Ok(self.plans.clone()),
        }
    }
}

/// Action that records every invocation and can be told to fail.
pub struct RecordingAction {
    pub fail: bool,
    calls: Mutex<Vec<Params>>,
}

impl RecordingAction {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self { fail: false, calls: Mutex::new(Vec::new()) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, calls: Mutex::new(Vec::new()) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<Params> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Action for RecordingAction {
    async fn invoke(&self, params: &Params) -> Result<Value, String> {
        self.calls.lock().push(params.clone());
        if self.fail {
            Err("injected failure".to_string())
        } else {
            Ok(json!({"status": "success"}))
        }
    }
}

/// Action that never returns, for timeout tests.
#[derive(Debug, Default)]
pub struct HangingAction;

#[async_trait]
impl Action for HangingAction {
    async fn invoke(&self, _params: &Params) -> Result<Value, String> {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        }
    }
}
