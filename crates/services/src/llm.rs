// SPDX-License-Identifier: MIT

//! LLM-backed analysis adapter.
//!
//! Talks to an OpenAI-style chat-completions endpoint. Root-cause analysis
//! returns free text; plan generation demands a JSON object that
//! [`crate::analysis::parse_plans`] understands.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use triage_core::{Alert, ContextBundle, RemediationPlan};

use crate::analysis::{parse_plans, AnalysisError, AnalysisService};
use crate::context::ServiceError;

/// Default chat-completions endpoint
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const ROOT_CAUSE_SYSTEM_PROMPT: &str = "\
You are a production incident analysis expert. Analyze the provided logs, \
metrics, and traces to determine the precise root cause.

Methodology:
1. Order events chronologically
2. Compare metric patterns against thresholds
3. Correlate error logs with traces
4. Account for system dependencies

Answer with: the root cause (one clear sentence), 2-3 key pieces of \
evidence, the blast radius, and a confidence score from 1 to 10.";

const PLANNING_SYSTEM_PROMPT: &str = "\
You are a systems operations expert. Based on the root-cause analysis, \
propose exactly 3 concrete remediation plans. Each plan must list the tools \
to run, in order.

Available tools:
- check_ecs_health: check ECS service health
- restart_ecs_task: restart ECS tasks
- verify_restart: verify service health after a restart
- check_db_connections: check database connection usage
- restart_db_pool: recycle the database connection pool
- validate_db_health: validate database health
- reduce_traffic: reduce inbound traffic by a percentage
- restart_all_services: restart every service in a cluster
- gradual_traffic_restore: restore traffic in steps

Respond with JSON only, in this shape:
{
  \"actions\": [
    {
      \"id\": 1,
      \"title\": \"Restart ECS service\",
      \"description\": \"Immediate restart to clear timeouts\",
      \"risk_level\": \"medium\",
      \"estimated_time\": \"3 minutes\",
      \"tools\": [
        {\"name\": \"check_ecs_health\", \"params\": {\"service\": \"api-service\"}},
        {\"name\": \"restart_ecs_task\", \"params\": {\"service\": \"api-service\"}},
        {\"name\": \"verify_restart\", \"params\": {\"service\": \"api-service\"}}
      ]
    }
  ],
  \"recommendation\": 1
}
risk_level must be one of \"low\", \"medium\", \"high\".";

/// Connection settings for the analysis model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: String,
    /// Chat-completions endpoint; the default targets OpenAI
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_API_URL.to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.1,
            max_tokens: 2000,
        }
    }
}

impl LlmConfig {
    /// Fill the API key from `OPENAI_API_KEY` when the config leaves it blank.
    pub fn with_env_key(mut self) -> Self {
        if self.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                self.api_key = key;
            }
        }
        self
    }
}

/// Production analysis adapter over an OpenAI-style API.
pub struct LlmAnalysis {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl LlmAnalysis {
    pub fn new(config: LlmConfig) -> Self {
        Self { config, client: reqwest::Client::new() }
    }

    async fn complete(&self, system: &str, user: String) -> Result<String, ServiceError> {
        if self.config.api_key.is_empty() {
            return Err(ServiceError::Unavailable("no analysis API key configured".to_string()));
        }

        let body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, model = %self.config.model, "analysis API request failed");
            return Err(ServiceError::Unavailable(format!(
                "analysis API returned {status}: {}",
                triage_core::id::short(&text, 200)
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ServiceError::Unavailable("empty completion".to_string()))
    }

    fn describe_context(context: &ContextBundle) -> String {
        let logs = context
            .logs
            .iter()
            .map(|l| format!("[{}] {} {}: {}", l.timestamp, l.level, l.service, l.message))
            .collect::<Vec<_>>()
            .join("\n");
        let metrics = context
            .metrics
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        let traces = context
            .traces
            .iter()
            .map(|t| {
                format!("trace {} {} {}ms status={}", t.trace_id, t.service, t.duration_ms, t.status)
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("Logs:\n{logs}\n\nMetrics:\n{metrics}\n\nTraces:\n{traces}")
    }
}

#[async_trait]
impl AnalysisService for LlmAnalysis {
    async fn analyze_root_cause(
        &self,
        context: &ContextBundle,
        alert: &Alert,
    ) -> Result<String, ServiceError> {
        let user = format!(
            "Analyze the root cause of this incident.\n\nAlert: [{}] {} on {}\n\n{}",
            alert.kind,
            alert.description,
            alert.service,
            Self::describe_context(context),
        );
        self.complete(ROOT_CAUSE_SYSTEM_PROMPT, user).await
    }

    async fn generate_plans(
        &self,
        root_cause: &str,
        context: &ContextBundle,
    ) -> Result<Vec<RemediationPlan>, AnalysisError> {
        let error_rate = context
            .metrics
            .get("error_rate")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let latency = context
            .metric_number("latency_p95_ms")
            .map(|v| format!("{v:.0}ms (P95)"))
            .unwrap_or_else(|| "unknown".to_string());

        let user = format!(
            "Propose 3 remediation plans as JSON.\n\nRoot cause:\n{root_cause}\n\n\
             Current situation:\n- error rate: {error_rate}\n- latency: {latency}",
        );
        let raw = self.complete(PLANNING_SYSTEM_PROMPT, user).await?;
        parse_plans(&raw)
    }
}
