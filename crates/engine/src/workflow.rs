// SPDX-License-Identifier: MIT

//! The workflow orchestrator state machine.
//!
//! Owns a run's state exclusively while driving it. Each call to [`run`]
//! advances node by node until the machine suspends at the approval gate or
//! reaches the terminal node; prior steps are never re-run. External-service
//! failures degrade (empty context, fallback root cause, fallback plan);
//! no raw error crosses this boundary. Only invalid operator input or an
//! exhausted transition budget short-circuits to the terminal node.
//!
//! [`run`]: Orchestrator::run

use std::future::Future;
use thiserror::Error;
use tokio::time::timeout;
use triage_core::{
    Alert, Clock, ContextBundle, Decision, Outcome, RemediationPlan, RiskLevel, RunId, RunState,
    WorkflowState,
};
use triage_services::{
    ActionRegistry, AnalysisError, AnalysisService, ContextService, ServiceError,
};

use crate::config::TriageConfig;
use crate::executor::PlanExecutor;
use crate::gate::DecisionPrompt;
use crate::validation::validate;

/// Where a driving call left the run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    /// Halted at the approval gate; persist the run state and ask the
    /// operator, then call [`Orchestrator::resume`].
    Suspended(DecisionPrompt),
    /// The run reached the terminal node; outcome and summary are final.
    Terminal,
}

/// Resumption is the one operation that can be raced; a run that is not
/// suspended at the gate refuses to progress again.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("run {run_id} is not suspended at the approval gate (state: {state})")]
    NotSuspended { run_id: RunId, state: WorkflowState },
}

/// Drives triage runs through the workflow graph.
pub struct Orchestrator<Ctx, An, Clk> {
    config: TriageConfig,
    context: Ctx,
    analysis: An,
    registry: ActionRegistry,
    clock: Clk,
}

impl<Ctx, An, Clk> Orchestrator<Ctx, An, Clk>
where
    Ctx: ContextService,
    An: AnalysisService,
    Clk: Clock,
{
    pub fn new(
        config: TriageConfig,
        context: Ctx,
        analysis: An,
        registry: ActionRegistry,
        clock: Clk,
    ) -> Self {
        Self { config, context, analysis, registry, clock }
    }

    /// Create a fresh run for an alert, positioned at alert intake.
    pub fn new_run(&self, alert: Alert) -> RunState {
        RunState::new(RunId::generate(), alert, self.clock.epoch_ms())
    }

    /// Advance the run until it suspends or terminates.
    ///
    /// Safe to call repeatedly: a suspended run suspends again without
    /// re-running prior steps, and a terminal run stays terminal.
    pub async fn run(&self, run: &mut RunState) -> RunStatus {
        loop {
            match run.current_state {
                WorkflowState::Terminal => return RunStatus::Terminal,
                WorkflowState::ApprovalGate if run.decision.is_none() => {
                    tracing::info!(run_id = %run.id, version = run.version, "suspending for approval");
                    run.touch();
                    return RunStatus::Suspended(DecisionPrompt::for_run(run));
                }
                _ => {}
            }

            if run.transitions >= self.config.max_transitions {
                tracing::warn!(
                    run_id = %run.id,
                    transitions = run.transitions,
                    "transition budget exhausted, failing run"
                );
                run.outcome = Some(Outcome::Failed);
                run.summary = Some(format!(
                    "Run exceeded its transition budget ({}); aborting to prevent \
                     unbounded re-analysis cycling.",
                    self.config.max_transitions
                ));
                run.current_state = WorkflowState::Terminal;
                run.touch();
                continue;
            }

            run.transitions += 1;
            self.step(run).await;
            run.touch();
        }
    }

    /// Resume a suspended run with free-form operator input.
    ///
    /// A plain function call, not a continuation: the caller hands back the
    /// persisted state and the decision text. At-most-once progression past
    /// the gate is enforced here: a run that already left the gate returns
    /// [`ResumeError::NotSuspended`]. Hosts persisting concurrently should
    /// additionally compare-and-swap on `RunState::version`.
    pub async fn resume(&self, run: &mut RunState, input: &str) -> Result<RunStatus, ResumeError> {
        if !run.is_suspended() {
            return Err(ResumeError::NotSuspended {
                run_id: run.id.clone(),
                state: run.current_state,
            });
        }

        match input.parse::<Decision>() {
            Ok(decision) => {
                tracing::info!(run_id = %run.id, decision = %decision, "resuming run");
                run.decision = Some(decision);
                run.touch();
            }
            Err(err) => {
                tracing::warn!(run_id = %run.id, error = %err, "invalid decision input");
                run.summary = Some(format!("invalid decision: {err}"));
                run.current_state = WorkflowState::Terminal;
                run.touch();
                return Ok(RunStatus::Terminal);
            }
        }

        Ok(self.run(run).await)
    }

    /// Execute one node and set the next state.
    async fn step(&self, run: &mut RunState) {
        let state = run.current_state;
        tracing::debug!(run_id = %run.id, %state, "entering node");

        match state {
            WorkflowState::AlertIntake => {
                tracing::info!(
                    run_id = %run.id,
                    service = %run.alert.service,
                    kind = %run.alert.kind,
                    "alert received"
                );
                run.current_state = WorkflowState::ContextCollection;
            }

            WorkflowState::ContextCollection => {
                let bundle = match self.bounded(self.context.collect(&run.alert)).await {
                    Ok(bundle) => bundle,
                    Err(err) => {
                        tracing::warn!(
                            run_id = %run.id,
                            error = %err,
                            "context collection failed, proceeding with empty context"
                        );
                        ContextBundle::default()
                    }
                };
                run.context = Some(bundle);
                run.current_state = WorkflowState::RootCauseAnalysis;
            }

            WorkflowState::RootCauseAnalysis => {
                let context = run.context.clone().unwrap_or_default();
                let cause = match self
                    .bounded(self.analysis.analyze_root_cause(&context, &run.alert))
                    .await
                {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(run_id = %run.id, error = %err, "root-cause analysis failed");
                        format!("Analysis unavailable ({err}); manual analysis required.")
                    }
                };
                run.root_cause = Some(cause);
                run.current_state = WorkflowState::PlanGeneration;
            }

            WorkflowState::PlanGeneration => {
                let context = run.context.clone().unwrap_or_default();
                let root_cause = run.root_cause.clone().unwrap_or_default();
                let outcome = timeout(
                    self.config.step_timeout(),
                    self.analysis.generate_plans(&root_cause, &context),
                )
                .await;

                let mut plans = match outcome {
                    Ok(Ok(plans)) if !plans.is_empty() => plans,
                    Ok(Ok(_)) => fallback_plans("analysis returned no plans"),
                    Ok(Err(err)) => {
                        tracing::warn!(run_id = %run.id, error = %err, "plan generation failed");
                        match err {
                            AnalysisError::Parse(reason) => fallback_plans(&reason),
                            AnalysisError::Unavailable(reason) => fallback_plans(&reason),
                        }
                    }
                    Err(_) => fallback_plans("plan generation timed out"),
                };
                // Ids are 1-based in list order no matter what the service claimed.
                for (idx, plan) in plans.iter_mut().enumerate() {
                    plan.id = idx + 1;
                }
                tracing::info!(run_id = %run.id, count = plans.len(), "plans generated");
                run.plans = plans;
                run.current_state = WorkflowState::ApprovalGate;
            }

            WorkflowState::ApprovalGate => self.route_decision(run),

            WorkflowState::Execute => {
                // step_results is replaced wholesale at the start of each
                // execution run.
                let report = match &run.selected_plan {
                    Some(plan) => {
                        let executor = PlanExecutor::new(
                            &self.registry,
                            self.clock.clone(),
                            self.config.step_timeout(),
                        );
                        executor.execute(plan).await
                    }
                    None => crate::executor::ExecutionReport {
                        results: Vec::new(),
                        fully_satisfied: false,
                    },
                };
                tracing::info!(
                    run_id = %run.id,
                    steps = report.results.len(),
                    successes = report.success_count(),
                    fully_satisfied = report.fully_satisfied,
                    "plan executed"
                );
                run.step_results = report.results;
                run.current_state = WorkflowState::Validate;
            }

            WorkflowState::Validate => {
                let validation = validate(&run.step_results, run.context.as_ref());
                tracing::info!(
                    run_id = %run.id,
                    outcome = %validation.outcome,
                    success_rate = validation.success_rate,
                    "run validated"
                );
                run.outcome = Some(validation.outcome);
                run.summary = Some(validation.summary);
                run.current_state = WorkflowState::Terminal;
            }

            WorkflowState::ManualHandling => {
                run.outcome = Some(Outcome::Manual);
                run.step_results.clear();
                run.summary = Some(
                    "Manual remediation in progress; the operator is resolving the \
                     incident directly."
                        .to_string(),
                );
                run.current_state = WorkflowState::Terminal;
            }

            // Both handled before step() is called.
            WorkflowState::Terminal => {}
        }
    }

    /// Conditional edge out of the approval gate, evaluated on resume.
    fn route_decision(&self, run: &mut RunState) {
        match run.decision {
            Some(Decision::Plan(id)) => match run.plan(id).cloned() {
                Some(plan) => {
                    tracing::info!(run_id = %run.id, plan = id, title = %plan.title, "plan approved");
                    run.selected_plan = Some(plan);
                    run.current_state = WorkflowState::Execute;
                }
                None => {
                    tracing::warn!(run_id = %run.id, plan = id, "plan index out of range");
                    run.summary = Some(format!(
                        "invalid decision: plan {id} is out of range (1-{})",
                        run.plans.len()
                    ));
                    run.current_state = WorkflowState::Terminal;
                }
            },
            Some(Decision::Manual) => {
                run.current_state = WorkflowState::ManualHandling;
            }
            Some(Decision::Reanalyze) => {
                tracing::info!(run_id = %run.id, "re-analysis requested");
                run.reset_analysis();
                run.current_state = WorkflowState::ContextCollection;
            }
            // Unreachable: run() suspends at the gate when no decision is set.
            None => {}
        }
    }

    /// Bound an external call by the per-step timeout; expiry degrades like
    /// any other service failure.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        match timeout(self.config.step_timeout(), fut).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Unavailable(format!(
                "timed out after {}ms",
                self.config.step_timeout_ms
            ))),
        }
    }
}

/// Deterministic single-plan fallback when plan generation fails. Selecting
/// it leads to an immediate failed outcome (no steps to run), which is the
/// honest answer when the analysis service cannot propose anything.
fn fallback_plans(reason: &str) -> Vec<RemediationPlan> {
    vec![RemediationPlan::new(1, "Manual inspection required", RiskLevel::Low)
        .description(format!("Automatic plan generation failed: {reason}"))
        .estimated_duration("manual")]
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
