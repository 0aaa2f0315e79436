// SPDX-License-Identifier: MIT

//! Recorded outcome of one tool invocation within an execution run.

use crate::plan::ToolInvocation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Success or failure of a single tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Success,
    Failed,
}

crate::simple_display! {
    StepStatus {
        Success => "success",
        Failed => "failed",
    }
}

/// One entry in a run's step-result history. Append-only within an
/// execution run; the whole sequence is replaced at the start of each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub tool: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    pub status: StepStatus,
    /// Payload returned by the action on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    /// Captured error text on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub finished_at_ms: u64,
}

impl StepResult {
    pub fn success(invocation: &ToolInvocation, output: Value, finished_at_ms: u64) -> Self {
        Self {
            tool: invocation.tool.clone(),
            params: invocation.params.clone(),
            status: StepStatus::Success,
            output: Some(output),
            error: None,
            finished_at_ms,
        }
    }

    pub fn failure(
        invocation: &ToolInvocation,
        error: impl Into<String>,
        finished_at_ms: u64,
    ) -> Self {
        Self {
            tool: invocation.tool.clone(),
            params: invocation.params.clone(),
            status: StepStatus::Failed,
            output: None,
            error: Some(error.into()),
            finished_at_ms,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Success
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
