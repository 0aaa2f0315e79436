// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! triage-services: external collaborator boundaries for the triage engine.
//!
//! The orchestrator treats three things as opaque services: the telemetry
//! provider that collects diagnostic context, the analysis service that
//! produces root-cause text and remediation plans, and the registry of named
//! remediation actions. Each boundary is a trait with a production adapter
//! and a deterministic scripted adapter; the engine degrades gracefully when
//! any of them fails.

pub mod analysis;
pub mod context;
pub mod llm;
pub mod registry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use analysis::{AnalysisError, AnalysisService, ScriptedAnalysis};
pub use context::{ContextService, ScriptedContext, ServiceError};
pub use llm::{LlmAnalysis, LlmConfig};
pub use registry::{Action, ActionError, ActionRegistry};
