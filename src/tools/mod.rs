//! Tool Layer
//!
//! Exposes the analytical functions as named tools taking and returning
//! JSON, so they can be listed and invoked generically (HTTP, CLI).
//!
//! - **builtin**: `calculate_cycle_phase`, `analyze_mood_patterns`,
//!   `generate_recommendations`

pub mod builtin;

use crate::cycle::CycleCalculator;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

pub use builtin::{AnalyzeMoodPatternsTool, CalculateCyclePhaseTool, GenerateRecommendationsTool};

/// Tool errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// A named function callable with JSON arguments
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    fn input_schema(&self) -> &Value;

    /// Run the tool. Domain failures (bad dates, malformed logs) come back
    /// as values in the result; `Err` is reserved for unusable arguments.
    async fn execute(&self, args: Value) -> ToolResult<Value>;
}

/// Public description of a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Tools by name
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the three built-in tools
    pub fn with_builtin(calculator: CycleCalculator) -> Self {
        Self::new()
            .register(CalculateCyclePhaseTool::new(calculator))
            .register(AnalyzeMoodPatternsTool::new())
            .register(GenerateRecommendationsTool::new())
    }

    pub fn register(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Specs sorted by name
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools
            .values()
            .map(|tool| ToolSpec {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema().clone(),
            })
            .collect()
    }

    /// Invoke a tool by name
    pub async fn call(&self, name: &str, args: Value) -> ToolResult<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tracing::info!(tool = name, "Tool call");
        let result = tool.execute(args).await;

        match &result {
            Ok(value) => {
                let status = value.get("status").and_then(|s| s.as_str()).unwrap_or("-");
                tracing::debug!(tool = name, status, "Tool result");
            }
            Err(e) => tracing::warn!(tool = name, error = %e, "Tool call failed"),
        }
        result
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
