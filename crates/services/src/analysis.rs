// SPDX-License-Identifier: MIT

//! Analysis boundary: root-cause text and remediation-plan generation.
//!
//! The production adapter ([`crate::llm::LlmAnalysis`]) asks an LLM; the
//! scripted adapter here returns fixed output for tests and offline use.
//! Both speak the same wire format for plans, parsed by [`parse_plans`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use triage_core::{Alert, ContextBundle, RemediationPlan, RiskLevel, ToolInvocation};

use crate::context::ServiceError;

/// Failure modes of plan generation. `Parse` signals structurally malformed
/// analysis output; the orchestrator substitutes a fallback plan for either
/// variant rather than failing the run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis service unavailable: {0}")]
    Unavailable(String),
    #[error("malformed plan output: {0}")]
    Parse(String),
}

impl From<ServiceError> for AnalysisError {
    fn from(err: ServiceError) -> Self {
        AnalysisError::Unavailable(err.to_string())
    }
}

/// Produces root-cause text and ranked remediation plans.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Derive a root-cause narrative from the collected context.
    async fn analyze_root_cause(
        &self,
        context: &ContextBundle,
        alert: &Alert,
    ) -> Result<String, ServiceError>;

    /// Propose a ranked list of remediation plans for a root cause.
    async fn generate_plans(
        &self,
        root_cause: &str,
        context: &ContextBundle,
    ) -> Result<Vec<RemediationPlan>, AnalysisError>;
}

// Wire format shared by the LLM adapter and the plan parser. Mirrors the
// JSON schema the planning prompt demands.
#[derive(Debug, Deserialize)]
struct PlanListWire {
    actions: Vec<PlanWire>,
}

#[derive(Debug, Deserialize)]
struct PlanWire {
    #[serde(default)]
    id: Option<usize>,
    title: String,
    #[serde(default)]
    description: String,
    risk_level: RiskLevel,
    #[serde(default)]
    estimated_time: String,
    #[serde(default)]
    tools: Vec<ToolWire>,
}

#[derive(Debug, Deserialize)]
struct ToolWire {
    name: String,
    #[serde(default)]
    params: Map<String, Value>,
}

/// Slice out the first top-level JSON object from LLM output, tolerating
/// prose or code fences around it.
pub fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse plan-generation output into remediation plans.
///
/// Plan ids are renumbered 1-based in list order regardless of what the
/// model claimed, so decision routing stays stable.
pub fn parse_plans(raw: &str) -> Result<Vec<RemediationPlan>, AnalysisError> {
    let json = extract_json(raw)
        .ok_or_else(|| AnalysisError::Parse("no JSON object in output".to_string()))?;
    let wire: PlanListWire =
        serde_json::from_str(json).map_err(|e| AnalysisError::Parse(e.to_string()))?;
    if wire.actions.is_empty() {
        return Err(AnalysisError::Parse("empty action list".to_string()));
    }

    Ok(wire
        .actions
        .into_iter()
        .enumerate()
        .map(|(idx, p)| RemediationPlan {
            id: idx + 1,
            title: p.title,
            description: p.description,
            risk: p.risk_level,
            estimated_duration: p.estimated_time,
            steps: p
                .tools
                .into_iter()
                .map(|t| ToolInvocation { tool: t.name, params: t.params })
                .collect(),
        })
        .collect())
}

/// Deterministic analysis adapter. Returns a fixed root-cause narrative and
/// the three standard remediation plans built from the built-in actions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnalysis;

impl ScriptedAnalysis {
    /// The three standard plans for a database-connection incident,
    /// mirroring what the planning prompt asks the model for.
    pub fn standard_plans(service: &str) -> Vec<RemediationPlan> {
        vec![
            RemediationPlan::new(1, "Restart ECS service", RiskLevel::Medium)
                .description("Immediate restart to clear connection timeouts")
                .estimated_duration("3 minutes")
                .step(ToolInvocation::new("check_ecs_health").param("service", service))
                .step(ToolInvocation::new("restart_ecs_task").param("service", service))
                .step(ToolInvocation::new("verify_restart").param("service", service)),
            RemediationPlan::new(2, "Reset database connection pool", RiskLevel::Low)
                .description("Recycle the exhausted connection pool")
                .estimated_duration("2 minutes")
                .step(ToolInvocation::new("check_db_connections").param("database", "main"))
                .step(ToolInvocation::new("restart_db_pool").param("database", "main"))
                .step(ToolInvocation::new("validate_db_health").param("database", "main")),
            RemediationPlan::new(3, "Traffic-controlled full restart", RiskLevel::High)
                .description("Drain traffic, restart everything, restore gradually")
                .estimated_duration("10 minutes")
                .step(ToolInvocation::new("reduce_traffic").param("percentage", 50))
                .step(ToolInvocation::new("restart_all_services").param("cluster", "prod"))
                .step(ToolInvocation::new("gradual_traffic_restore").param("steps", 5)),
        ]
    }
}

#[async_trait]
impl AnalysisService for ScriptedAnalysis {
    async fn analyze_root_cause(
        &self,
        context: &ContextBundle,
        alert: &Alert,
    ) -> Result<String, ServiceError> {
        let pool = context
            .metric_number("db_connection_count")
            .zip(context.metric_number("db_max_connections"))
            .map(|(cur, max)| format!(" ({cur:.0}/{max:.0} connections in use)"))
            .unwrap_or_default();
        Ok(format!(
            "Database connection pool exhaustion on {}{pool}: \
             queries time out once the pool saturates, cascading into request failures.",
            alert.service
        ))
    }

    async fn generate_plans(
        &self,
        _root_cause: &str,
        _context: &ContextBundle,
    ) -> Result<Vec<RemediationPlan>, AnalysisError> {
        Ok(Self::standard_plans("service-a"))
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
