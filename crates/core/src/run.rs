// SPDX-License-Identifier: MIT

//! Run state: the single mutable record threaded through every workflow step.

use crate::alert::Alert;
use crate::context::ContextBundle;
use crate::decision::Decision;
use crate::plan::RemediationPlan;
use crate::step::StepResult;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a triage run.
    pub struct RunId("run-");
}

/// Nodes of the workflow graph. Persisted as the `current_state` tag so a
/// host can resume a suspended run from exactly where it halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    AlertIntake,
    ContextCollection,
    RootCauseAnalysis,
    PlanGeneration,
    ApprovalGate,
    Execute,
    Validate,
    ManualHandling,
    Terminal,
}

crate::simple_display! {
    WorkflowState {
        AlertIntake => "alert_intake",
        ContextCollection => "context_collection",
        RootCauseAnalysis => "root_cause_analysis",
        PlanGeneration => "plan_generation",
        ApprovalGate => "approval_gate",
        Execute => "execute",
        Validate => "validate",
        ManualHandling => "manual_handling",
        Terminal => "terminal",
    }
}

/// Final classification of a run. Absence (`None` on the run) means the run
/// has not been classified yet, or terminated on invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Resolved,
    Partial,
    Failed,
    Manual,
}

crate::simple_display! {
    Outcome {
        Resolved => "resolved",
        Partial => "partial",
        Failed => "failed",
        Manual => "manual",
    }
}

/// Mutable state of one triage run.
///
/// The orchestrator owns this exclusively while driving; at the approval
/// suspension point it hands the record back to the caller, who persists it
/// and later passes it to `resume`. The whole record is serde round-trippable
/// so any host storage works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub id: RunId,
    pub alert: Alert,
    pub current_state: WorkflowState,
    /// Bumped on every mutation so hosts can compare-and-swap persisted
    /// copies (guards racing resumptions of the same suspended run).
    pub version: u64,
    /// Count of node transitions taken; the orchestrator fails the run when
    /// this exceeds its budget (bounds the reanalyze loop).
    pub transitions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextBundle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<RemediationPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    /// Set only when the decision is a valid 1-based plan index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_plan: Option<RemediationPlan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub step_results: Vec<StepResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub created_at_ms: u64,
}

impl RunState {
    /// Create a fresh run for an alert, positioned at the intake node.
    pub fn new(id: RunId, alert: Alert, created_at_ms: u64) -> Self {
        Self {
            id,
            alert,
            current_state: WorkflowState::AlertIntake,
            version: 0,
            transitions: 0,
            context: None,
            root_cause: None,
            plans: Vec::new(),
            decision: None,
            selected_plan: None,
            step_results: Vec::new(),
            outcome: None,
            summary: None,
            created_at_ms,
        }
    }

    /// Bump the version counter. Called by the orchestrator after every
    /// mutation batch so persisted copies can be compare-and-swapped.
    pub fn touch(&mut self) {
        self.version += 1;
    }

    /// Clear everything a re-analysis cycle regenerates, keeping the alert.
    pub fn reset_analysis(&mut self) {
        self.context = None;
        self.root_cause = None;
        self.plans.clear();
        self.decision = None;
        self.selected_plan = None;
        self.step_results.clear();
        self.outcome = None;
        self.summary = None;
    }

    /// Whether the run has reached the terminal node.
    pub fn is_terminal(&self) -> bool {
        self.current_state == WorkflowState::Terminal
    }

    /// Whether the run is halted at the approval gate awaiting a decision.
    pub fn is_suspended(&self) -> bool {
        self.current_state == WorkflowState::ApprovalGate && self.decision.is_none()
    }

    /// The plan with the given 1-based id, if generated this cycle.
    pub fn plan(&self, id: usize) -> Option<&RemediationPlan> {
        self.plans.iter().find(|p| p.id == id)
    }
}

crate::builder! {
    pub struct RunStateBuilder => RunState {
        set {
            id: RunId = RunId::new("run-test"),
            alert: Alert = crate::test_support::test_alert(),
            current_state: WorkflowState = WorkflowState::AlertIntake,
            version: u64 = 0,
            transitions: u32 = 0,
            plans: Vec<RemediationPlan> = Vec::new(),
            step_results: Vec<StepResult> = Vec::new(),
            created_at_ms: u64 = 1_000_000,
        }
        option {
            context: ContextBundle = None,
            root_cause: String = None,
            decision: Decision = None,
            selected_plan: RemediationPlan = None,
            outcome: Outcome = None,
            summary: String = None,
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
