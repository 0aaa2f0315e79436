// SPDX-License-Identifier: MIT

use super::*;
use serde_json::json;

#[test]
fn success_result_captures_output() {
    let inv = ToolInvocation::new("check_ecs_health").param("service", "api-service");
    let result = StepResult::success(&inv, json!({"status": "RUNNING"}), 1_000_500);

    assert_eq!(result.tool, "check_ecs_health");
    assert_eq!(result.params, inv.params);
    assert!(result.is_success());
    assert_eq!(result.output, Some(json!({"status": "RUNNING"})));
    assert!(result.error.is_none());
    assert_eq!(result.finished_at_ms, 1_000_500);
}

#[test]
fn failure_result_captures_error() {
    let inv = ToolInvocation::new("restart_db_pool");
    let result = StepResult::failure(&inv, "connection refused", 1_000_500);

    assert_eq!(result.status, StepStatus::Failed);
    assert!(!result.is_success());
    assert!(result.output.is_none());
    assert_eq!(result.error.as_deref(), Some("connection refused"));
}

#[test]
fn step_status_display() {
    assert_eq!(StepStatus::Success.to_string(), "success");
    assert_eq!(StepStatus::Failed.to_string(), "failed");
}

#[test]
fn result_serde_skips_absent_fields() {
    let inv = ToolInvocation::new("verify_restart");
    let result = StepResult::failure(&inv, "timeout", 1_000_000);
    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("output"));
    assert!(!json.contains("params"));
    let parsed: StepResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);
}
