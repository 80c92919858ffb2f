//! Goal parsing: free text in, `GoalParseResult` out.
//!
//! Unlike assessments there is no heuristic fallback for goals: every failure
//! becomes a `success: false` result carrying the reasons and suggestions for
//! rephrasing. Nothing here returns an error to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::assessment::extractor::extract_json;
use crate::assessment::pipeline::PipelineError;
use crate::assessment::repair::parse_with_repair;
use crate::assessment::validator::{string_list, ValidationError};
use crate::goals::prompts::GOAL_PARSE_PROMPT_TEMPLATE;
use crate::llm_client::TextGenerator;

pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_TIMEFRAME_WEEKS: u32 = 4;
pub const MIN_TIMEFRAME_WEEKS: u32 = 1;
pub const MAX_TIMEFRAME_WEEKS: u32 = 52;

const REPHRASE_SUGGESTIONS: [&str; 3] = [
    "Describe each goal in its own sentence.",
    "Name the skill you want to improve and a timeframe, for example \"get comfortable with async Rust in 6 weeks\".",
    "Keep unrelated goals apart instead of combining them.",
];
const RETRY_SUGGESTION: &str = "The goal assistant could not be reached. Try again in a moment.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl GoalPriority {
    /// Case-insensitive; anything unrecognised is `Medium`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => GoalPriority::High,
            "low" => GoalPriority::Low,
            _ => GoalPriority::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedGoal {
    pub title: String,
    pub description: String,
    pub category: String,
    pub target_skills: Vec<String>,
    pub timeframe_weeks: u32,
    pub priority: GoalPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurable_outcome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalParseResult {
    pub success: bool,
    pub goals: Vec<ParsedGoal>,
    pub parse_errors: Vec<String>,
    pub suggestions: Vec<String>,
}

impl GoalParseResult {
    fn failure(parse_errors: Vec<String>, retryable: bool) -> Self {
        let mut suggestions: Vec<String> =
            REPHRASE_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
        if retryable {
            suggestions.push(RETRY_SUGGESTION.to_string());
        }
        Self {
            success: false,
            goals: Vec::new(),
            parse_errors,
            suggestions,
        }
    }
}

/// Goals that passed validation, plus a note for every entry that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedGoals {
    pub goals: Vec<ParsedGoal>,
    pub skipped: Vec<String>,
}

pub fn validate_goal_parse_result(raw: &Value) -> Result<ValidatedGoals, ValidationError> {
    let obj = raw.as_object().ok_or(ValidationError::NotAnObject)?;
    let items = obj
        .get("goals")
        .ok_or(ValidationError::MissingField("goals"))?
        .as_array()
        .ok_or(ValidationError::InvalidField {
            field: "goals",
            reason: "expected an array",
        })?;

    let mut goals = Vec::new();
    let mut skipped = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match validate_goal(item) {
            Ok(goal) => goals.push(goal),
            Err(reason) => skipped.push(format!("goal {}: {}", index + 1, reason)),
        }
    }

    if goals.is_empty() {
        return Err(ValidationError::NoUsableGoals);
    }
    Ok(ValidatedGoals { goals, skipped })
}

fn validate_goal(item: &Value) -> Result<ParsedGoal, &'static str> {
    let obj = item.as_object().ok_or("not an object")?;
    let title = non_blank(obj.get("title")).ok_or("missing title")?;

    Ok(ParsedGoal {
        title,
        description: non_blank(obj.get("description")).unwrap_or_default(),
        category: non_blank(obj.get("category"))
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        target_skills: string_list(obj.get("targetSkills")),
        timeframe_weeks: timeframe_weeks(obj.get("timeframeWeeks")),
        priority: obj
            .get("priority")
            .and_then(Value::as_str)
            .map(GoalPriority::parse)
            .unwrap_or_default(),
        measurable_outcome: non_blank(obj.get("measurableOutcome")),
    })
}

fn non_blank(raw: Option<&Value>) -> Option<String> {
    raw.and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Accepts numbers and numeric strings; clamps to 1..=52, defaults to 4.
fn timeframe_weeks(raw: Option<&Value>) -> u32 {
    let weeks = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match weeks {
        Some(w) if w.is_finite() => {
            (w.round().max(0.0) as u32).clamp(MIN_TIMEFRAME_WEEKS, MAX_TIMEFRAME_WEEKS)
        }
        _ => DEFAULT_TIMEFRAME_WEEKS,
    }
}

pub fn build_goal_prompt(text: &str) -> String {
    GOAL_PARSE_PROMPT_TEMPLATE.replace("{goal_text}", text.trim())
}

/// Parses free-text goals through the model. Awaits the generator at most once.
pub async fn parse_goals(text: &str, generator: &dyn TextGenerator) -> GoalParseResult {
    if text.trim().is_empty() {
        return GoalParseResult::failure(vec!["goal text is empty".to_string()], false);
    }

    match model_goals(text, generator).await {
        Ok(validated) => {
            info!(
                "Parsed {} goal(s), skipped {}",
                validated.goals.len(),
                validated.skipped.len()
            );
            GoalParseResult {
                success: true,
                goals: validated.goals,
                parse_errors: validated.skipped,
                suggestions: Vec::new(),
            }
        }
        Err(e) => {
            warn!("Goal parsing failed: {e}");
            let retryable = matches!(e, PipelineError::Transport(_));
            GoalParseResult::failure(vec![e.to_string()], retryable)
        }
    }
}

async fn model_goals(
    text: &str,
    generator: &dyn TextGenerator,
) -> Result<ValidatedGoals, PipelineError> {
    let response = generator.generate(&build_goal_prompt(text)).await?;
    let payload = extract_json(&response)?;
    let value = parse_with_repair(payload)?;
    Ok(validate_goal_parse_result(&value)?)
}
