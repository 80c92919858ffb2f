// All LLM prompt constants for the Goals module.

/// Goal parsing prompt.
/// Replace: {goal_text}
pub const GOAL_PARSE_PROMPT_TEMPLATE: &str = r#"Turn the learner's free-text description of their goals into structured goals.

Rules:
- One entry per distinct goal. Do NOT merge unrelated goals.
- title is a short imperative phrase.
- category is one of: technical, career, soft_skill, general.
- priority is one of: high, medium, low.
- timeframeWeeks is an integer number of weeks (1 to 52).
- targetSkills lists the concrete skills the goal exercises.
- measurableOutcome states how the learner will know the goal is met, or is omitted.

Return a JSON object with this EXACT schema:
{
  "goals": [
    {
      "title": "Learn async Rust",
      "description": "Build confidence with tokio and futures",
      "category": "technical",
      "targetSkills": ["rust", "tokio"],
      "timeframeWeeks": 6,
      "priority": "high",
      "measurableOutcome": "Ship a small async web service"
    }
  ]
}

GOALS:
{goal_text}"#;
