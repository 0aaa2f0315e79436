// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! triage-engine: the incident triage workflow orchestrator.
//!
//! A run walks a fixed graph: alert intake, context collection, root-cause
//! analysis, plan generation, then suspends at the approval gate until an
//! operator decides. The decision routes to plan execution and validation,
//! to manual handling, or loops back for re-analysis. Suspension is not a
//! blocking wait: the orchestrator returns the run state to the caller,
//! who persists it and later calls [`Orchestrator::resume`].

pub mod config;
pub mod executor;
pub mod gate;
pub mod validation;
pub mod workflow;

pub use config::TriageConfig;
pub use executor::{ExecutionReport, PlanExecutor};
pub use gate::{DecisionPrompt, PromptOption};
pub use validation::{validate, Validation};
pub use workflow::{Orchestrator, ResumeError, RunStatus};
