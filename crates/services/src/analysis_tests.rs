// SPDX-License-Identifier: MIT

use super::*;
use triage_core::test_support::test_alert;

const PLAN_JSON: &str = r#"{
  "actions": [
    {
      "id": 7,
      "title": "Restart ECS service",
      "description": "Immediate restart",
      "risk_level": "medium",
      "estimated_time": "3 minutes",
      "tools": [
        {"name": "check_ecs_health", "params": {"service": "api-service"}},
        {"name": "restart_ecs_task", "params": {"service": "api-service", "force": true}}
      ]
    },
    {
      "title": "Reset DB pool",
      "risk_level": "low",
      "tools": [{"name": "restart_db_pool"}]
    }
  ],
  "recommendation": 1
}"#;

#[test]
fn extract_json_slices_object() {
    let raw = format!("Here is the plan:\n```json\n{PLAN_JSON}\n```\nLet me know!");
    let json = extract_json(&raw).unwrap();
    assert!(json.starts_with('{'));
    assert!(json.ends_with('}'));
    assert!(serde_json::from_str::<serde_json::Value>(json).is_ok());
}

#[yare::parameterized(
    empty     = { "" },
    no_object = { "no json here" },
    reversed  = { "} {" },
)]
fn extract_json_rejects_non_objects(raw: &str) {
    assert!(extract_json(raw).is_none());
}

#[test]
fn parse_plans_renumbers_ids_in_order() {
    let plans = parse_plans(PLAN_JSON).unwrap();
    assert_eq!(plans.len(), 2);
    // the model claimed id 7 for the first plan; renumbered to 1
    assert_eq!(plans[0].id, 1);
    assert_eq!(plans[1].id, 2);
    assert_eq!(plans[0].risk, RiskLevel::Medium);
    assert_eq!(plans[0].steps.len(), 2);
    assert_eq!(plans[0].steps[1].params.get("force"), Some(&serde_json::json!(true)));
    assert_eq!(plans[1].tool_names(), vec!["restart_db_pool"]);
}

#[yare::parameterized(
    prose        = { "I cannot generate plans right now." },
    wrong_shape  = { r#"{"plans": []}"# },
    empty_list   = { r#"{"actions": []}"# },
    bad_risk     = { r#"{"actions": [{"title": "x", "risk_level": "scary"}]}"# },
)]
fn parse_plans_rejects_malformed_output(raw: &str) {
    assert!(matches!(parse_plans(raw), Err(AnalysisError::Parse(_))));
}

#[tokio::test]
async fn scripted_analysis_root_cause_names_service_and_pool() {
    let mut context = ContextBundle::default();
    context.metrics.insert("db_connection_count".to_string(), 20.0.into());
    context.metrics.insert("db_max_connections".to_string(), 20.0.into());

    let text = ScriptedAnalysis.analyze_root_cause(&context, &test_alert()).await.unwrap();
    assert!(text.contains("service-a"));
    assert!(text.contains("20/20"));
}

#[tokio::test]
async fn scripted_analysis_generates_three_ranked_plans() {
    let plans = ScriptedAnalysis.generate_plans("pool exhausted", &ContextBundle::default())
        .await
        .unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(plans.iter().all(|p| p.steps.len() == 3));
    assert_eq!(plans[2].risk, RiskLevel::High);
}
