// SPDX-License-Identifier: MIT

//! The approval-gate prompt shown to the operator while a run is suspended.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use triage_core::RunState;

/// One selectable option: a generated plan or a sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptOption {
    /// What the operator types to pick this option ("1", "manual", ...)
    pub id: String,
    pub title: String,
    pub description: String,
    pub risk: String,
    pub estimated_duration: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
}

/// Everything the host needs to ask the operator for a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPrompt {
    pub root_cause: String,
    pub options: Vec<PromptOption>,
}

impl DecisionPrompt {
    /// Build the prompt for a run suspended at the approval gate: every
    /// generated plan plus the `manual` and `reanalyze` sentinels.
    pub fn for_run(run: &RunState) -> Self {
        let mut options: Vec<PromptOption> = run
            .plans
            .iter()
            .map(|plan| PromptOption {
                id: plan.id.to_string(),
                title: plan.title.clone(),
                description: plan.description.clone(),
                risk: plan.risk.to_string(),
                estimated_duration: plan.estimated_duration.clone(),
                tools: plan.tool_names().iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        options.push(PromptOption {
            id: "manual".to_string(),
            title: "Manual remediation".to_string(),
            description: "Resolve the incident yourself".to_string(),
            risk: "operator's judgement".to_string(),
            estimated_duration: "operator's judgement".to_string(),
            tools: Vec::new(),
        });
        options.push(PromptOption {
            id: "reanalyze".to_string(),
            title: "Request re-analysis".to_string(),
            description: "Collect fresh context and analyze again".to_string(),
            risk: "none".to_string(),
            estimated_duration: "3-5 minutes".to_string(),
            tools: Vec::new(),
        });

        Self {
            root_cause: run.root_cause.clone().unwrap_or_else(|| "unknown".to_string()),
            options,
        }
    }

    /// Plain-text rendering for chat or terminal hosts.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Analysis complete. Choose a remediation.\n");
        let _ = writeln!(out, "Root cause: {}\n", self.root_cause);
        for opt in &self.options {
            let _ = writeln!(out, "{}. {}", opt.id, opt.title);
            if !opt.description.is_empty() {
                let _ = writeln!(out, "   description: {}", opt.description);
            }
            let _ = writeln!(out, "   risk: {}", opt.risk);
            let _ = writeln!(out, "   estimated duration: {}", opt.estimated_duration);
            if !opt.tools.is_empty() {
                let _ = writeln!(out, "   tools: {}", opt.tools.join(", "));
            }
        }
        let _ = write!(out, "\nEnter a plan number, 'manual', or 'reanalyze'.");
        out
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
