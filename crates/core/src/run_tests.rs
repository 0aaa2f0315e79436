// SPDX-License-Identifier: MIT

use super::*;
use crate::test_support::{test_alert, test_plan};

#[test]
fn new_run_starts_at_intake() {
    let run = RunState::new(RunId::new("run-1"), test_alert(), 1_000_000);
    assert_eq!(run.current_state, WorkflowState::AlertIntake);
    assert_eq!(run.version, 0);
    assert!(run.context.is_none());
    assert!(run.plans.is_empty());
    assert!(run.outcome.is_none());
    assert!(!run.is_terminal());
    assert!(!run.is_suspended());
}

#[test]
fn touch_bumps_version() {
    let mut run = RunState::new(RunId::new("run-1"), test_alert(), 1_000_000);
    run.touch();
    run.touch();
    assert_eq!(run.version, 2);
}

#[test]
fn reset_analysis_clears_cycle_state_keeps_alert() {
    let mut run = RunState::builder()
        .current_state(WorkflowState::ApprovalGate)
        .root_cause("db pool exhausted")
        .plans(vec![test_plan(1)])
        .decision(Decision::Reanalyze)
        .selected_plan(test_plan(1))
        .outcome(Outcome::Partial)
        .summary("partial")
        .build();
    run.context = Some(ContextBundle::default());
    let alert = run.alert.clone();

    run.reset_analysis();

    assert!(run.context.is_none());
    assert!(run.root_cause.is_none());
    assert!(run.plans.is_empty());
    assert!(run.decision.is_none());
    assert!(run.selected_plan.is_none());
    assert!(run.step_results.is_empty());
    assert!(run.outcome.is_none());
    assert!(run.summary.is_none());
    assert_eq!(run.alert, alert);
}

#[test]
fn suspended_only_at_gate_without_decision() {
    let mut run = RunState::builder().current_state(WorkflowState::ApprovalGate).build();
    assert!(run.is_suspended());

    run.decision = Some(Decision::Manual);
    assert!(!run.is_suspended());

    run.decision = None;
    run.current_state = WorkflowState::Execute;
    assert!(!run.is_suspended());
}

#[test]
fn plan_lookup_by_id() {
    let run = RunState::builder().plans(vec![test_plan(1), test_plan(2)]).build();
    assert_eq!(run.plan(2).map(|p| p.id), Some(2));
    assert!(run.plan(5).is_none());
}

#[test]
fn workflow_state_display() {
    assert_eq!(WorkflowState::ApprovalGate.to_string(), "approval_gate");
    assert_eq!(WorkflowState::Terminal.to_string(), "terminal");
}

#[test]
fn outcome_serde_snake_case() {
    assert_eq!(serde_json::to_string(&Outcome::Resolved).unwrap(), "\"resolved\"");
    assert_eq!(serde_json::to_string(&Outcome::Manual).unwrap(), "\"manual\"");
}

#[test]
fn run_state_serde_roundtrip_preserves_suspension() {
    let run = RunState::builder()
        .current_state(WorkflowState::ApprovalGate)
        .root_cause("Connection pool exhausted")
        .plans(vec![test_plan(1), test_plan(2), test_plan(3)])
        .transitions(5)
        .version(5)
        .build();

    let json = serde_json::to_string(&run).unwrap();
    let restored: RunState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, run);
    assert!(restored.is_suspended());
    assert_eq!(restored.version, 5);
}
