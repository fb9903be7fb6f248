//! Built-in tools wrapping the cycle calculator, pattern analyzer and
//! recommendation generator

use crate::analysis::PatternAnalyzer;
use crate::cycle::CycleCalculator;
use crate::recommend::{RecommendationGenerator, RecommendationOutcome};
use crate::tools::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Map, Value};

fn expect_object<'a>(tool: &str, args: &'a Value) -> ToolResult<&'a Map<String, Value>> {
    args.as_object().ok_or_else(|| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: "arguments must be a JSON object".to_string(),
    })
}

fn error_value(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string() })
}

/// `calculate_cycle_phase`
pub struct CalculateCyclePhaseTool {
    calculator: CycleCalculator,
    schema: Value,
}

impl CalculateCyclePhaseTool {
    pub const NAME: &'static str = "calculate_cycle_phase";

    pub fn new(calculator: CycleCalculator) -> Self {
        let schema = json!({
            "type": "object",
            "properties": {
                "last_period_date": {
                    "type": "string",
                    "description": "Start date of the last period (YYYY-MM-DD)"
                },
                "cycle_length": {
                    "type": "integer",
                    "description": "Average cycle length in days",
                    "default": calculator.default_length()
                }
            },
            "required": ["last_period_date"]
        });
        Self { calculator, schema }
    }
}

#[async_trait]
impl Tool for CalculateCyclePhaseTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Calculate the current menstrual cycle phase and predict the next period"
    }

    fn input_schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(&self, args: Value) -> ToolResult<Value> {
        let args = expect_object(Self::NAME, &args)?;

        let Some(date) = args.get("last_period_date").and_then(Value::as_str) else {
            return Ok(error_value("last_period_date is required (YYYY-MM-DD)"));
        };

        let cycle_length = match args.get("cycle_length") {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_i64() {
                Some(length) => Some(length),
                None => return Ok(error_value("cycle_length must be an integer")),
            },
        };

        match self.calculator.calculate(date, cycle_length) {
            Ok(status) => Ok(serde_json::to_value(status)?),
            Err(e) => Ok(error_value(e)),
        }
    }
}

/// `analyze_mood_patterns`
pub struct AnalyzeMoodPatternsTool {
    analyzer: PatternAnalyzer,
    schema: Value,
}

impl AnalyzeMoodPatternsTool {
    pub const NAME: &'static str = "analyze_mood_patterns";

    pub fn new() -> Self {
        Self {
            analyzer: PatternAnalyzer::new(),
            schema: json!({
                "type": "object",
                "properties": {
                    "mood_logs": {
                        "description": "Mood log records, as a list or a JSON-encoded string",
                        "type": ["array", "string"],
                        "items": {
                            "type": "object",
                            "properties": {
                                "date": { "type": "string" },
                                "cycle_phase": { "type": "string" },
                                "mood": { "type": "string" },
                                "symptoms": { "type": "array", "items": { "type": "string" } },
                                "notes": { "type": "string" }
                            }
                        }
                    }
                },
                "required": ["mood_logs"]
            }),
        }
    }
}

impl Default for AnalyzeMoodPatternsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for AnalyzeMoodPatternsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Find phase-mood correlations, frequent symptoms and the overall mood trend"
    }

    fn input_schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(&self, args: Value) -> ToolResult<Value> {
        let args = expect_object(Self::NAME, &args)?;
        let logs = args.get("mood_logs").unwrap_or(&Value::Null);
        Ok(serde_json::to_value(self.analyzer.analyze_value(logs))?)
    }
}

/// `generate_recommendations`
pub struct GenerateRecommendationsTool {
    generator: RecommendationGenerator,
    schema: Value,
}

impl GenerateRecommendationsTool {
    pub const NAME: &'static str = "generate_recommendations";

    pub fn new() -> Self {
        Self {
            generator: RecommendationGenerator::new(),
            schema: json!({
                "type": "object",
                "properties": {
                    "cycle_phase": {
                        "type": "string",
                        "enum": ["Menstrual", "Follicular", "Ovulation", "Luteal"]
                    },
                    "mood": { "type": "string" },
                    "symptoms": {
                        "type": "array",
                        "items": { "type": "string" },
                        "default": []
                    }
                },
                "required": ["cycle_phase", "mood"]
            }),
        }
    }

    fn recommend(&self, args: &Map<String, Value>) -> RecommendationOutcome {
        let Some(phase) = args.get("cycle_phase").and_then(Value::as_str) else {
            return RecommendationOutcome::error("cycle_phase must be a string");
        };
        let Some(mood) = args.get("mood").and_then(Value::as_str) else {
            return RecommendationOutcome::error("mood must be a string");
        };

        let symptoms: Vec<&str> = match args.get("symptoms") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                match items.iter().map(Value::as_str).collect::<Option<Vec<_>>>() {
                    Some(symptoms) => symptoms,
                    None => return RecommendationOutcome::error("symptoms must be strings"),
                }
            }
            Some(_) => return RecommendationOutcome::error("symptoms must be a list"),
        };

        self.generator.generate(phase, mood, &symptoms).into()
    }
}

impl Default for GenerateRecommendationsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GenerateRecommendationsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Suggest wellness activities for a cycle phase, mood and symptoms"
    }

    fn input_schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(&self, args: Value) -> ToolResult<Value> {
        let args = expect_object(Self::NAME, &args)?;
        Ok(serde_json::to_value(self.recommend(args))?)
    }
}
