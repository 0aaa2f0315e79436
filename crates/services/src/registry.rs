// SPDX-License-Identifier: MIT

//! Named remediation actions and the registry that resolves them.
//!
//! The registry does exactly one invocation per call and performs no
//! retries; retry policy belongs to the execution engine.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Parameter mapping passed to an action.
pub type Params = Map<String, Value>;

/// Errors surfaced by the registry. The execution engine captures these as
/// failed step results; they never propagate past it.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("unknown action '{0}'")]
    Unknown(String),
    #[error("action '{tool}' failed: {reason}")]
    Failed { tool: String, reason: String },
}

/// A single invocable remediation action.
#[async_trait]
pub trait Action: Send + Sync {
    async fn invoke(&self, params: &Params) -> Result<Value, String>;
}

impl std::fmt::Debug for dyn Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Action")
    }
}

/// Wrap a plain function as an [`Action`].
struct FnAction<F>(F);

#[async_trait]
impl<F> Action for FnAction<F>
where
    F: Fn(&Params) -> Result<Value, String> + Send + Sync,
{
    async fn invoke(&self, params: &Params) -> Result<Value, String> {
        (self.0)(params)
    }
}

/// Maps tool names to invocable actions.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in mock remediation tools.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_fn("check_ecs_health", |p| {
            Ok(json!({
                "service": str_param(p, "service"),
                "status": "RUNNING",
                "running_count": 3,
                "desired_count": 3,
                "healthy_tasks": 2,
                "health_status": "degraded",
            }))
        });
        registry.register_fn("restart_ecs_task", |p| {
            Ok(json!({
                "service": str_param(p, "service"),
                "action": "restart_completed",
                "new_task_count": 3,
                "status": "success",
            }))
        });
        registry.register_fn("verify_restart", |p| {
            Ok(json!({
                "service": str_param(p, "service"),
                "verification_status": "healthy",
                "response_time_ms": 150,
                "error_rate": 0.01,
            }))
        });
        registry.register_fn("check_db_connections", |p| {
            Ok(json!({
                "database": str_param(p, "database"),
                "active_connections": 18,
                "max_connections": 20,
                "connection_pool_status": "near_full",
            }))
        });
        registry.register_fn("restart_db_pool", |p| {
            Ok(json!({
                "database": str_param(p, "database"),
                "action": "pool_restarted",
                "new_connection_count": 5,
                "status": "success",
            }))
        });
        registry.register_fn("validate_db_health", |p| {
            Ok(json!({
                "database": str_param(p, "database"),
                "status": "healthy",
                "response_time_ms": 45,
                "active_connections": 8,
            }))
        });
        registry.register_fn("reduce_traffic", |p| {
            Ok(json!({
                "action": "traffic_reduced",
                "reduction_percentage": p.get("percentage").cloned().unwrap_or(json!(50)),
                "current_rps": 75,
                "status": "success",
            }))
        });
        registry.register_fn("restart_all_services", |p| {
            Ok(json!({
                "cluster": str_param(p, "cluster"),
                "services_restarted": ["api-service", "worker-service", "auth-service"],
                "status": "success",
            }))
        });
        registry.register_fn("gradual_traffic_restore", |p| {
            Ok(json!({
                "action": "traffic_restored",
                "restore_steps": p.get("steps").cloned().unwrap_or(json!(5)),
                "current_rps": 150,
                "status": "success",
            }))
        });
        registry
    }

    /// Register an action under a tool name, replacing any existing one.
    pub fn register(&mut self, name: impl Into<String>, action: Arc<dyn Action>) {
        self.actions.insert(name.into(), action);
    }

    /// Register a plain function as an action.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Params) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(FnAction(f)));
    }

    /// Look up an action; unknown names are an error, not a panic.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Action>, ActionError> {
        self.actions.get(name).cloned().ok_or_else(|| ActionError::Unknown(name.to_string()))
    }

    /// Resolve and invoke an action in one call. One invocation, no retries.
    pub async fn invoke(&self, name: &str, params: &Params) -> Result<Value, ActionError> {
        let action = self.resolve(name)?;
        action
            .invoke(params)
            .await
            .map_err(|reason| ActionError::Failed { tool: name.to_string(), reason })
    }

    /// Registered tool names, sorted for stable output.
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn str_param<'a>(params: &'a Params, key: &str) -> &'a str {
    params.get(key).and_then(Value::as_str).unwrap_or("unknown")
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
