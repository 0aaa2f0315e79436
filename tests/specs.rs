// SPDX-License-Identifier: MIT

//! End-to-end scenarios driving the orchestrator through suspension,
//! persistence, and resumption the way a host application would.

use triage_core::test_support::test_alert;
use triage_core::{
    Decision, FakeClock, Outcome, RemediationPlan, RiskLevel, RunState, StepStatus, ToolInvocation,
};
use triage_engine::{Orchestrator, ResumeError, RunStatus, TriageConfig};
use triage_services::test_support::{AnalysisFailure, FailingContext, FakeAnalysis};
use triage_services::{ActionRegistry, ScriptedAnalysis, ScriptedContext};

fn scripted() -> Orchestrator<ScriptedContext, ScriptedAnalysis, FakeClock> {
    Orchestrator::new(
        TriageConfig::default(),
        ScriptedContext,
        ScriptedAnalysis,
        ActionRegistry::builtin(),
        FakeClock::new(),
    )
}

/// Serialize and deserialize the run state, as a host persisting to storage
/// across the suspension would.
fn persist_and_restore(run: &RunState) -> RunState {
    let stored = serde_json::to_string(run).expect("run state serializes");
    serde_json::from_str(&stored).expect("run state deserializes")
}

#[tokio::test]
async fn alert_to_resolution_with_a_persistence_gap() {
    let orchestrator = scripted();
    let mut run = orchestrator.new_run(test_alert());

    let status = orchestrator.run(&mut run).await;
    let RunStatus::Suspended(prompt) = status else {
        panic!("expected suspension, got {status:?}");
    };
    assert!(prompt.render().contains("Enter a plan number"));

    // The host stores the run, asks the operator, and restores it later.
    let mut restored = persist_and_restore(&run);
    assert!(restored.is_suspended());
    assert_eq!(restored.version, run.version);

    let status = orchestrator.resume(&mut restored, "2").await.unwrap();

    assert_eq!(status, RunStatus::Terminal);
    assert_eq!(restored.outcome, Some(Outcome::Resolved));
    assert_eq!(restored.decision, Some(Decision::Plan(2)));
    let tools: Vec<&str> = restored.step_results.iter().map(|r| r.tool.as_str()).collect();
    assert_eq!(tools, ["check_db_connections", "restart_db_pool", "validate_db_health"]);
    assert!(restored.step_results.iter().all(|r| r.status == StepStatus::Success));
}

#[tokio::test]
async fn operator_takes_over_manually() {
    let orchestrator = scripted();
    let mut run = orchestrator.new_run(test_alert());
    orchestrator.run(&mut run).await;

    let mut restored = persist_and_restore(&run);
    let status = orchestrator.resume(&mut restored, "manual").await.unwrap();

    assert_eq!(status, RunStatus::Terminal);
    assert_eq!(restored.outcome, Some(Outcome::Manual));
    assert!(restored.step_results.is_empty());
}

#[tokio::test]
async fn reanalysis_then_approval_of_the_high_risk_plan() {
    let orchestrator = scripted();
    let mut run = orchestrator.new_run(test_alert());
    orchestrator.run(&mut run).await;

    let status = orchestrator.resume(&mut run, "reanalyze").await.unwrap();
    assert!(matches!(status, RunStatus::Suspended(_)));
    assert!(run.decision.is_none(), "decision must clear for the new cycle");

    let status = orchestrator.resume(&mut run, "3").await.unwrap();

    assert_eq!(status, RunStatus::Terminal);
    assert_eq!(run.outcome, Some(Outcome::Resolved));
    let tools: Vec<&str> = run.step_results.iter().map(|r| r.tool.as_str()).collect();
    assert_eq!(tools, ["reduce_traffic", "restart_all_services", "gradual_traffic_restore"]);
}

#[tokio::test]
async fn degraded_services_still_reach_the_operator() {
    let orchestrator = Orchestrator::new(
        TriageConfig::default(),
        FailingContext,
        FakeAnalysis::failing(AnalysisFailure::PlansMalformed),
        ActionRegistry::builtin(),
        FakeClock::new(),
    );
    let mut run = orchestrator.new_run(test_alert());

    let status = orchestrator.run(&mut run).await;

    let RunStatus::Suspended(prompt) = status else {
        panic!("expected suspension, got {status:?}");
    };
    assert!(run.context.as_ref().unwrap().is_empty());
    assert_eq!(run.plans.len(), 1);
    assert!(prompt.render().contains("Manual inspection required"));
}

#[tokio::test]
async fn custom_actions_surface_their_output_in_step_results() {
    let plan = RemediationPlan::new(1, "Flush cache", RiskLevel::Low)
        .step(ToolInvocation::new("flush_cache").param("region", "us-west-2"));
    let mut registry = ActionRegistry::new();
    registry.register_fn("flush_cache", |params| {
        Ok(serde_json::json!({
            "region": params.get("region").cloned(),
            "entries_flushed": 1234,
        }))
    });
    let orchestrator = Orchestrator::new(
        TriageConfig::default(),
        ScriptedContext,
        FakeAnalysis::with_plans(vec![plan]),
        registry,
        FakeClock::new(),
    );
    let mut run = orchestrator.new_run(test_alert());
    orchestrator.run(&mut run).await;

    orchestrator.resume(&mut run, "1").await.unwrap();

    assert_eq!(run.outcome, Some(Outcome::Resolved));
    let output = run.step_results[0].output.as_ref().unwrap();
    assert_eq!(output["entries_flushed"], 1234);
}

#[tokio::test]
async fn invalid_input_ends_the_run_and_blocks_further_resumes() {
    let orchestrator = scripted();
    let mut run = orchestrator.new_run(test_alert());
    orchestrator.run(&mut run).await;

    let status = orchestrator.resume(&mut run, "yes please").await.unwrap();
    assert_eq!(status, RunStatus::Terminal);
    assert_eq!(run.outcome, None);

    let err = orchestrator.resume(&mut run, "1").await.unwrap_err();
    assert!(matches!(err, ResumeError::NotSuspended { .. }));
}

#[tokio::test]
async fn terminal_run_state_survives_persistence() {
    let orchestrator = scripted();
    let mut run = orchestrator.new_run(test_alert());
    orchestrator.run(&mut run).await;
    orchestrator.resume(&mut run, "1").await.unwrap();

    let restored = persist_and_restore(&run);

    assert_eq!(restored, run);
    assert!(restored.is_terminal());
    assert_eq!(restored.outcome, Some(Outcome::Resolved));
}
