// SPDX-License-Identifier: MIT

use super::*;

#[yare::parameterized(
    plain        = { "2", Decision::Plan(2) },
    whitespace   = { "  3 ", Decision::Plan(3) },
    zero         = { "0", Decision::Plan(0) },
    manual       = { "manual", Decision::Manual },
    manual_caps  = { "MANUAL", Decision::Manual },
    reanalyze    = { "reanalyze", Decision::Reanalyze },
    mixed_case   = { " Reanalyze ", Decision::Reanalyze },
)]
fn parse_normalizes_input(input: &str, expected: Decision) {
    assert_eq!(input.parse::<Decision>().unwrap(), expected);
}

#[yare::parameterized(
    empty     = { "" },
    word      = { "retry" },
    negative  = { "-1" },
    float     = { "1.5" },
    sentence  = { "run plan two" },
)]
fn parse_rejects_garbage(input: &str) {
    let err = input.parse::<Decision>().unwrap_err();
    assert_eq!(err.input, input);
}

#[test]
fn plan_id_accessor() {
    assert_eq!(Decision::Plan(2).plan_id(), Some(2));
    assert_eq!(Decision::Manual.plan_id(), None);
    assert_eq!(Decision::Reanalyze.plan_id(), None);
}

#[test]
fn decision_serde_roundtrip() {
    for decision in [Decision::Plan(1), Decision::Manual, Decision::Reanalyze] {
        let json = serde_json::to_string(&decision).unwrap();
        let parsed: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, decision);
    }
}

#[test]
fn decision_error_names_input() {
    let err = "wat".parse::<Decision>().unwrap_err();
    assert!(err.to_string().contains("'wat'"));
}
