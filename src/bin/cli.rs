//! Cycle Wellness CLI
//!
//! Command-line interface for the Cycle Wellness API:
//! - Calculate cycle phases
//! - Log moods and run check-ins
//! - Review history and patterns
//! - Get recommendations

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use cycle_wellness::config::{generate_default_config, Config};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cycle-wellness-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cycle phase tracking, mood patterns and wellness recommendations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://127.0.0.1:8090", global = true)]
    pub api_url: String,

    /// User id (default: store.default_user_id from config)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current cycle phase
    Phase {
        /// Last period start (YYYY-MM-DD); uses stored cycle info when omitted
        last_period_date: Option<String>,
        /// Average cycle length in days
        #[arg(short, long)]
        cycle_length: Option<i64>,
        /// Store the date and length for the user
        #[arg(long)]
        save: bool,
    },

    /// Log a mood
    Log {
        mood: String,
        /// Symptoms (comma-separated or repeated)
        #[arg(short, long, value_delimiter = ',')]
        symptoms: Vec<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Entry date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Cycle phase (default: derived from stored cycle info)
        #[arg(short, long)]
        phase: Option<String>,
    },

    /// Show mood history
    History {
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only entries from this phase
        #[arg(short, long)]
        phase: Option<String>,
    },

    /// Analyze mood patterns
    Analyze {
        /// JSON file of mood records; analyzes stored history when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Get wellness recommendations
    Recommend {
        phase: String,
        mood: String,
        #[arg(short, long, value_delimiter = ',')]
        symptoms: Vec<String>,
    },

    /// Full check-in: log, analyze and recommend
    Checkin {
        mood: String,
        #[arg(short, long, value_delimiter = ',')]
        symptoms: Vec<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Update the last period start (YYYY-MM-DD)
        #[arg(long)]
        last_period: Option<String>,
        #[arg(short, long)]
        cycle_length: Option<i64>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List stored patterns
    Patterns {
        /// phase_mood_correlation, symptom_pattern or overall_trend
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Delete all data for the user
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// List tools, or call one with JSON arguments
    Tools {
        name: Option<String>,
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the effective configuration instead
        #[arg(long)]
        show: bool,
    },
}

struct Api {
    client: reqwest::Client,
    base: String,
}

impl Api {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> anyhow::Result<Value> {
        let response = request
            .send()
            .await
            .with_context(|| format!("cannot connect to Cycle Wellness API at {}", self.base))?;

        let status = response.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body["error"]["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            bail!("request failed ({}): {}", status, message);
        }
        Ok(body)
    }

    async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn get_with_query(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    async fn post(&self, path: &str, body: &Value) -> anyhow::Result<Value> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> anyhow::Result<Value> {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    async fn delete(&self, path: &str) -> anyhow::Result<Value> {
        self.send(self.client.delete(self.url(path))).await
    }
}

/// API path for one user, with the id percent-encoded as a single segment
fn user_path(user: &str) -> String {
    format!("/api/v1/users/{}", urlencoding::encode(user))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_default();
    let user = cli
        .user
        .clone()
        .unwrap_or_else(|| config.store.default_user_id.clone());
    let json_output = cli.format == "json";

    let api = Api {
        client: reqwest::Client::new(),
        base: cli.api_url.clone(),
    };
    let user_path = user_path(&user);

    let output = match cli.command {
        Commands::Phase {
            last_period_date,
            cycle_length,
            save,
        } => {
            let result = match last_period_date {
                Some(date) if save => {
                    let body = json!({ "last_period_date": date, "cycle_length": cycle_length });
                    field(api.put(&format!("{}/cycle", user_path), &body).await?, "status")
                }
                Some(date) => {
                    let body = json!({ "last_period_date": date, "cycle_length": cycle_length });
                    api.post("/api/v1/cycle/phase", &body).await?
                }
                None => field(api.get(&format!("{}/cycle", user_path)).await?, "status"),
            };
            Output::new(result, print_phase)
        }

        Commands::Log {
            mood,
            symptoms,
            notes,
            date,
            phase,
        } => {
            let body = json!({
                "mood": mood,
                "symptoms": symptoms,
                "notes": notes,
                "date": date,
                "cycle_phase": phase,
            });
            let entry = api.post(&format!("{}/moods", user_path), &body).await?;
            Output::new(entry, |entry| {
                println!(
                    "Logged {} on {} ({} phase)",
                    text(&entry["mood"]),
                    text(&entry["date"]),
                    text(&entry["cycle_phase"])
                );
            })
        }

        Commands::History { limit, phase } => {
            let mut query = Vec::new();
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }
            if let Some(phase) = phase {
                query.push(("phase", phase));
            }
            let path = format!("{}/moods", user_path);
            Output::new(api.get_with_query(&path, &query).await?, print_history)
        }

        Commands::Analyze { file } => {
            let result = match file {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    api.post("/api/v1/patterns/analyze", &json!({ "mood_logs": content }))
                        .await?
                }
                None => field(
                    api.post(&format!("{}/patterns/refresh", user_path), &json!({}))
                        .await?,
                    "analysis",
                ),
            };
            Output::new(result, print_analysis)
        }

        Commands::Recommend {
            phase,
            mood,
            symptoms,
        } => {
            let body = json!({ "cycle_phase": phase, "mood": mood, "symptoms": symptoms });
            let result = api.post("/api/v1/recommendations", &body).await?;
            Output::new(result, print_recommendations)
        }

        Commands::Checkin {
            mood,
            symptoms,
            notes,
            last_period,
            cycle_length,
            date,
        } => {
            let body = json!({
                "mood": mood,
                "symptoms": symptoms,
                "notes": notes,
                "last_period_date": last_period,
                "cycle_length": cycle_length,
                "date": date,
            });
            let report = api.post(&format!("{}/checkin", user_path), &body).await?;
            Output::new(report, print_checkin)
        }

        Commands::Patterns { kind } => {
            let query: Vec<(&str, String)> = kind.into_iter().map(|k| ("type", k)).collect();
            let path = format!("{}/patterns", user_path);
            Output::new(api.get_with_query(&path, &query).await?, |body| {
                let patterns = body["patterns"].as_array().cloned().unwrap_or_default();
                if patterns.is_empty() {
                    println!("No patterns stored yet. Run `analyze` after logging a few moods.");
                }
                for pattern in patterns {
                    println!("{:<24} {}", text(&pattern["type"]), text(&pattern["description"]));
                }
            })
        }

        Commands::Reset { yes } => {
            if !yes {
                bail!("refusing to delete all data for {} without --yes", user);
            }
            api.delete(&user_path).await?;
            Output::new(json!({ "deleted": user }), |body| {
                println!("All data cleared for {}", text(&body["deleted"]));
            })
        }

        Commands::Tools { name, args } => match name {
            Some(name) => {
                let args: Value = serde_json::from_str(&args).context("--args must be JSON")?;
                let path = format!("/api/v1/tools/{}", urlencoding::encode(&name));
                let result = api.post(&path, &args).await?;
                Output::new(result, |result| {
                    println!("{}", serde_json::to_string_pretty(result).unwrap_or_default());
                })
            }
            None => Output::new(api.get("/api/v1/tools").await?, |body| {
                for tool in body["tools"].as_array().cloned().unwrap_or_default() {
                    println!("{:<26} {}", text(&tool["name"]), text(&tool["description"]));
                }
            }),
        },

        Commands::Status => Output::new(api.get("/health").await?, |health| {
            println!("Cycle Wellness v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API Status: {}", text(&health["status"]));
            println!("Tools: {}", health["tools"].as_u64().unwrap_or(0));
            println!();
            println!("Store:");
            for key in ["users", "cycle_records", "mood_logs", "patterns"] {
                println!("  {}: {}", key, health["store"][key].as_u64().unwrap_or(0));
            }
            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!();
                println!("Uptime: {}", format_duration(uptime));
            }
        }),

        Commands::Config { output, show } => {
            let content = if show {
                toml::to_string_pretty(&config)?
            } else {
                generate_default_config()
            };

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            return Ok(());
        }
    };

    output.render(json_output)
}

/// A response body and how to print it as a table
struct Output {
    body: Value,
    table: fn(&Value),
}

impl Output {
    fn new(body: Value, table: fn(&Value)) -> Self {
        Self { body, table }
    }

    fn render(self, json: bool) -> anyhow::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&self.body)?);
        } else {
            (self.table)(&self.body);
        }
        Ok(())
    }
}

fn field(mut body: Value, key: &str) -> Value {
    body[key].take()
}

fn text(value: &Value) -> &str {
    value.as_str().unwrap_or("-")
}

fn print_phase(status: &Value) {
    if let Some(error) = status["error"].as_str() {
        println!("Error: {}", error);
        return;
    }
    println!(
        "{} phase (day {} of {})",
        text(&status["current_phase"]),
        status["day_in_cycle"].as_u64().unwrap_or(0) + 1,
        status["cycle_length"].as_u64().unwrap_or(0)
    );
    println!("  {}", text(&status["phase_description"]));
    println!(
        "Next period: {} ({} days)",
        text(&status["next_period_date"]),
        status["days_until_next_period"].as_i64().unwrap_or(0)
    );
}

fn print_history(body: &Value) {
    let logs = body["logs"].as_array().cloned().unwrap_or_default();
    if logs.is_empty() {
        println!("No mood logs yet.");
        return;
    }

    println!("{:<12} {:<12} {:<14} {}", "Date", "Phase", "Mood", "Symptoms");
    println!("{}", "-".repeat(60));
    for log in logs {
        let symptoms: Vec<&str> = log["symptoms"]
            .as_array()
            .map(|s| s.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        println!(
            "{:<12} {:<12} {:<14} {}",
            text(&log["date"]),
            text(&log["cycle_phase"]),
            text(&log["mood"]),
            symptoms.join(", ")
        );
    }
}

fn print_analysis(outcome: &Value) {
    match outcome["status"].as_str() {
        Some("success") => {
            println!("{}", text(&outcome["summary"]));
            for pattern in outcome["patterns_found"].as_array().cloned().unwrap_or_default() {
                println!("  - {}", text(&pattern["insight"]));
            }
        }
        Some("no_data") => println!("{}", text(&outcome["message"])),
        _ => println!("{}", text(&outcome["error_message"])),
    }
}

fn print_recommendations(outcome: &Value) {
    if outcome["status"] != "success" {
        println!("{}", text(&outcome["error_message"]));
        return;
    }

    for category in outcome["recommendations"].as_array().cloned().unwrap_or_default() {
        println!("{}: {}", text(&category["category"]), text(&category["focus"]));
        for suggestion in category["suggestions"].as_array().cloned().unwrap_or_default() {
            println!("  - {}", text(&suggestion));
        }
        if let Some(avoid) = category["avoid"].as_array() {
            let avoid: Vec<&str> = avoid.iter().filter_map(Value::as_str).collect();
            println!("  Avoid: {}", avoid.join(", "));
        }
    }
    println!();
    println!("{}", text(&outcome["encouragement"]));
    println!("{}", text(&outcome["note"]));
}

fn print_checkin(report: &Value) {
    if report["crisis_flagged"] == true {
        println!("If you are in crisis, please reach out now:");
        for resource in report["crisis_resources"].as_array().cloned().unwrap_or_default() {
            println!("  {}: {}", text(&resource["name"]), text(&resource["contact"]));
        }
        println!();
    }

    print_phase(&report["cycle"]);
    if report["first_entry"] == true {
        println!("First entry logged. Patterns appear after a few check-ins.");
    }
    println!();
    print_analysis(&report["analysis"]);
    println!();

    let mut recommendations = report["recommendations"].clone();
    recommendations["status"] = json!("success");
    print_recommendations(&recommendations);
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90000), "1d 1h");
    }

    #[test]
    fn test_user_path_encodes_segment() {
        assert_eq!(user_path("cycle_user"), "/api/v1/users/cycle_user");
        assert_eq!(user_path("a/b?c#d"), "/api/v1/users/a%2Fb%3Fc%23d");
        assert_eq!(user_path("jo ann"), "/api/v1/users/jo%20ann");
    }

    #[test]
    fn test_cli_parses_symptom_lists() {
        let cli = Cli::parse_from([
            "cycle-wellness-cli",
            "checkin",
            "anxious",
            "-s",
            "cramps,fatigue",
            "--last-period",
            "2025-11-18",
        ]);

        match cli.command {
            Commands::Checkin {
                mood,
                symptoms,
                last_period,
                ..
            } => {
                assert_eq!(mood, "anxious");
                assert_eq!(symptoms, vec!["cramps", "fatigue"]);
                assert_eq!(last_period.as_deref(), Some("2025-11-18"));
            }
            _ => panic!("expected checkin"),
        }
    }

    #[test]
    fn test_api_url_join() {
        let api = Api {
            client: reqwest::Client::new(),
            base: "http://localhost:8090/".to_string(),
        };
        assert_eq!(api.url("/health"), "http://localhost:8090/health");
    }
}
