// SPDX-License-Identifier: MIT

//! Shared helpers and proptest strategies for tests across the workspace.

use crate::alert::{Alert, AlertKind};
use crate::plan::{RemediationPlan, RiskLevel, ToolInvocation};
use crate::step::{StepResult, StepStatus};
use serde_json::Map;

/// A critical alert matching the canned telemetry fixtures.
pub fn test_alert() -> Alert {
    Alert::new("service-a", AlertKind::Critical, "High error rate detected")
        .raised_at("2024-01-15T10:30:00Z")
        .channel("#alerts")
}

/// A three-step plan (precondition check, restart, verification).
pub fn test_plan(id: usize) -> RemediationPlan {
    RemediationPlan::new(id, "Restart service", RiskLevel::Medium)
        .description("Restart the affected service tasks")
        .estimated_duration("3 minutes")
        .step(ToolInvocation::new("check_ecs_health").param("service", "service-a"))
        .step(ToolInvocation::new("restart_ecs_task").param("service", "service-a"))
        .step(ToolInvocation::new("verify_restart").param("service", "service-a"))
}

/// A bare step result with the given status, for validation tests.
pub fn step_result(tool: &str, status: StepStatus) -> StepResult {
    StepResult {
        tool: tool.to_string(),
        params: Map::new(),
        status,
        output: None,
        error: match status {
            StepStatus::Success => None,
            StepStatus::Failed => Some("boom".to_string()),
        },
        finished_at_ms: 1_000_000,
    }
}

/// A result sequence with the given success/failure counts.
pub fn results_with(successes: usize, failures: usize) -> Vec<StepResult> {
    let mut results = Vec::with_capacity(successes + failures);
    for i in 0..successes {
        results.push(step_result(&format!("tool-{i}"), StepStatus::Success));
    }
    for i in 0..failures {
        results.push(step_result(&format!("tool-fail-{i}"), StepStatus::Failed));
    }
    results
}

pub mod strategies {
    use super::*;
    use proptest::prelude::*;

    pub fn step_status() -> impl Strategy<Value = StepStatus> {
        prop_oneof![Just(StepStatus::Success), Just(StepStatus::Failed)]
    }

    pub fn step_results(max_len: usize) -> impl Strategy<Value = Vec<StepResult>> {
        proptest::collection::vec(step_status(), 0..=max_len).prop_map(|statuses| {
            statuses
                .into_iter()
                .enumerate()
                .map(|(i, status)| step_result(&format!("tool-{i}"), status))
                .collect()
        })
    }
}
