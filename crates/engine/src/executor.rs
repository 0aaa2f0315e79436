// SPDX-License-Identifier: MIT

//! Sequential plan executor.
//!
//! Runs a plan's tool invocations strictly in order against the action
//! registry. Later steps may depend on the side effects of earlier ones, so
//! there is no parallelism. Every invocation failure is captured as a failed
//! step result; nothing propagates past the executor.

use std::time::Duration;
use tokio::time::timeout;
use triage_core::{Clock, RemediationPlan, StepResult};
use triage_services::ActionRegistry;

/// Outcome of one execution run over a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    pub results: Vec<StepResult>,
    /// True only when every step in the plan ran and succeeded.
    pub fully_satisfied: bool,
}

impl ExecutionReport {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }
}

/// Executes remediation plans against an action registry.
pub struct PlanExecutor<'a, C: Clock> {
    registry: &'a ActionRegistry,
    clock: C,
    step_timeout: Duration,
}

impl<'a, C: Clock> PlanExecutor<'a, C> {
    pub fn new(registry: &'a ActionRegistry, clock: C, step_timeout: Duration) -> Self {
        Self { registry, clock, step_timeout }
    }

    /// Run the plan's invocations in order.
    ///
    /// Critical-step policy: a failure at the first or last position aborts
    /// the remaining invocations; those positions are load-bearing
    /// (typically a precondition check or a final verification). Failures
    /// in between do not stop execution.
    ///
    /// An empty plan performs no invocations and reports zero results.
    pub async fn execute(&self, plan: &RemediationPlan) -> ExecutionReport {
        let total = plan.steps.len();
        let mut results = Vec::with_capacity(total);

        for (pos, invocation) in plan.steps.iter().enumerate() {
            tracing::info!(
                tool = %invocation.tool,
                step = pos + 1,
                total,
                "invoking action"
            );

            let outcome = timeout(
                self.step_timeout,
                self.registry.invoke(&invocation.tool, &invocation.params),
            )
            .await;
            let finished_at_ms = self.clock.epoch_ms();

            let result = match outcome {
                Ok(Ok(output)) => StepResult::success(invocation, output, finished_at_ms),
                Ok(Err(err)) => StepResult::failure(invocation, err.to_string(), finished_at_ms),
                Err(_) => StepResult::failure(
                    invocation,
                    format!("timed out after {}ms", self.step_timeout.as_millis()),
                    finished_at_ms,
                ),
            };

            let failed = !result.is_success();
            if failed {
                tracing::warn!(
                    tool = %invocation.tool,
                    step = pos + 1,
                    error = result.error.as_deref().unwrap_or(""),
                    "action failed"
                );
            }
            results.push(result);

            // Critical-step policy: only bookend failures abort.
            if failed && (pos == 0 || pos == total - 1) {
                tracing::warn!(step = pos + 1, total, "critical step failed, aborting plan");
                break;
            }
        }

        let fully_satisfied =
            total > 0 && results.len() == total && results.iter().all(StepResult::is_success);

        ExecutionReport { results, fully_satisfied }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
