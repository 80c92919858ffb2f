// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt used for every structured-output call.
pub const STRUCTURED_OUTPUT_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with a single JSON object. \
    Wrap it in a ```json code fence. \
    Do NOT include explanations or apologies outside the fence.";

/// Reminder appended to prompts whose answers are scored numerically.
pub const SCORING_INSTRUCTION: &str = "\
    All scores are integers from 0 to 100. All confidence values are decimals from 0 to 1. \
    When a skill is inferred rather than directly evidenced, set isInferred to true \
    and lower its confidence accordingly. Do NOT invent experience the input does not support.";
