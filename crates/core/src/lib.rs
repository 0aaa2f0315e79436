// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! triage-core: Data model for the incident triage workflow.
//!
//! Everything a run accumulates lives here: the alert that started it, the
//! diagnostic context, the proposed remediation plans, the human decision,
//! per-step execution results, and the final outcome. The orchestrator in
//! `triage-engine` mutates a [`RunState`] in place; hosts serialize it at
//! the approval suspension point and hand it back on resume.

pub mod macros;

pub mod alert;
pub mod clock;
pub mod context;
pub mod decision;
pub mod id;
pub mod plan;
pub mod run;
pub mod step;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use alert::{Alert, AlertKind};
pub use clock::{Clock, FakeClock, SystemClock};
pub use context::{ContextBundle, LogEntry, LogLevel, MetricValue, TraceSpan};
pub use decision::{Decision, DecisionError};
pub use plan::{RemediationPlan, RiskLevel, ToolInvocation};
pub use run::{Outcome, RunId, RunState, WorkflowState};
pub use step::{StepResult, StepStatus};
