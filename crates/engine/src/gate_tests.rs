// SPDX-License-Identifier: MIT

use super::*;
use triage_core::test_support::test_plan;
use triage_core::{RunState, WorkflowState};

fn suspended_run() -> RunState {
    RunState::builder()
        .current_state(WorkflowState::ApprovalGate)
        .root_cause("ECS task crash loop from connection pool exhaustion")
        .plans(vec![test_plan(1), test_plan(2)])
        .build()
}

#[test]
fn lists_plans_then_the_sentinels() {
    let prompt = DecisionPrompt::for_run(&suspended_run());

    let ids: Vec<&str> = prompt.options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "manual", "reanalyze"]);
}

#[test]
fn plan_options_carry_risk_duration_and_tools() {
    let prompt = DecisionPrompt::for_run(&suspended_run());

    let first = &prompt.options[0];
    assert_eq!(first.title, "Restart service");
    assert_eq!(first.risk, "medium");
    assert_eq!(first.estimated_duration, "3 minutes");
    assert_eq!(first.tools, ["check_ecs_health", "restart_ecs_task", "verify_restart"]);
}

#[test]
fn sentinels_have_no_tools() {
    let prompt = DecisionPrompt::for_run(&suspended_run());

    for option in &prompt.options[2..] {
        assert!(option.tools.is_empty(), "sentinel {} should list no tools", option.id);
    }
}

#[test]
fn missing_root_cause_renders_as_unknown() {
    let run = RunState::builder().current_state(WorkflowState::ApprovalGate).build();
    let prompt = DecisionPrompt::for_run(&run);
    assert_eq!(prompt.root_cause, "unknown");
}

#[test]
fn render_includes_root_cause_and_input_instructions() {
    let rendered = DecisionPrompt::for_run(&suspended_run()).render();

    assert!(rendered.contains("Root cause: ECS task crash loop"), "{rendered}");
    assert!(rendered.contains("1. Restart service"), "{rendered}");
    assert!(rendered.contains("manual"), "{rendered}");
    assert!(rendered.ends_with("Enter a plan number, 'manual', or 'reanalyze'."), "{rendered}");
}
