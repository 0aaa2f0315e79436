// SPDX-License-Identifier: MIT

//! The human decision that resumes a suspended run.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Raised when free-form operator input cannot be normalized to a decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized decision '{input}' (expected a plan number, 'manual', or 'reanalyze')")]
pub struct DecisionError {
    pub input: String,
}

/// A normalized operator decision at the approval gate.
///
/// `Plan` holds the 1-based plan id as entered; range validation against the
/// available plans happens at the gate, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Plan(usize),
    Manual,
    Reanalyze,
}

crate::simple_display! {
    Decision {
        Plan(..) => "plan",
        Manual => "manual",
        Reanalyze => "reanalyze",
    }
}

impl Decision {
    /// The plan id chosen, if this decision selects a plan.
    pub fn plan_id(&self) -> Option<usize> {
        match self {
            Decision::Plan(id) => Some(*id),
            _ => None,
        }
    }
}

impl FromStr for Decision {
    type Err = DecisionError;

    /// Normalize free-form operator text.
    ///
    /// Accepts a bare integer ("2"), "manual", or "reanalyze", with
    /// surrounding whitespace and case differences tolerated.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Ok(id) = trimmed.parse::<usize>() {
            return Ok(Decision::Plan(id));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "manual" => Ok(Decision::Manual),
            "reanalyze" => Ok(Decision::Reanalyze),
            _ => Err(DecisionError { input: input.to_string() }),
        }
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
