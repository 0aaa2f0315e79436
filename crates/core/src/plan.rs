// SPDX-License-Identifier: MIT

//! Remediation plans proposed by the analysis service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Operator-facing risk rating for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

crate::simple_display! {
    RiskLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

/// One tool call within a plan: the registered action name plus its
/// parameter mapping, exactly as the executor will invoke it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl ToolInvocation {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into(), params: Map::new() }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// A named, risk-rated, ordered sequence of tool invocations.
///
/// Plan ids are 1-based and stable within one planning cycle; the human
/// decision references a plan by this id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationPlan {
    pub id: usize,
    pub title: String,
    pub description: String,
    pub risk: RiskLevel,
    /// Human-readable duration estimate (e.g. "3 minutes")
    pub estimated_duration: String,
    #[serde(default)]
    pub steps: Vec<ToolInvocation>,
}

impl RemediationPlan {
    pub fn new(id: usize, title: impl Into<String>, risk: RiskLevel) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            risk,
            estimated_duration: String::new(),
            steps: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn estimated_duration(mut self, dur: impl Into<String>) -> Self {
        self.estimated_duration = dur.into();
        self
    }

    pub fn step(mut self, step: ToolInvocation) -> Self {
        self.steps.push(step);
        self
    }

    /// Tool names in invocation order, for prompts and logging.
    pub fn tool_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.tool.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
