//! Assessment pipeline: orchestrates one assessment request.
//!
//! Flow: validate input → build prompt → generate (once) → extract → repair/parse
//!       → validate → Assessment. Any failure after input validation falls
//!       back to the heuristic scorer; the decision is made here and nowhere else.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assessment::extractor::{extract_json, ExtractionError};
use crate::assessment::fallback::score_fallback;
use crate::assessment::input::{AssessmentInput, InputError};
use crate::assessment::prompts::{
    ASSESSMENT_PROMPT_TEMPLATE, QUESTIONNAIRE_SECTION_TEMPLATE, RESUME_SECTION_TEMPLATE,
};
use crate::assessment::repair::parse_with_repair;
use crate::assessment::score_model::{Assessment, AssessmentMethod};
use crate::assessment::validator::{validate_assessment, AssessmentContext, ValidationError};
use crate::errors::AppError;
use crate::llm_client::prompts::SCORING_INSTRUCTION;
use crate::llm_client::{LlmError, TextGenerator};
use crate::plan::cache::PlanCache;
use crate::profile::{
    read_typed, write_typed, ProfileError, ProfileStore, ASSESSMENT_HISTORY_KEY, ASSESSMENT_KEY,
};

/// Everything that can go wrong between the model call and a valid assessment.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("text generation failed: {0}")]
    Transport(#[from] LlmError),

    #[error(transparent)]
    NoJsonFound(#[from] ExtractionError),

    #[error("model JSON could not be parsed after repair: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model JSON failed validation: {0}")]
    Validation(#[from] ValidationError),
}

/// Runs the model path and falls back to heuristic scoring on any
/// `PipelineError`. Only a malformed input is an error.
pub async fn assess(
    input: &AssessmentInput,
    generator: &dyn TextGenerator,
    assessed_at: DateTime<Utc>,
) -> Result<Assessment, InputError> {
    let method = input.method()?;
    let context = AssessmentContext {
        assessed_at,
        method,
    };

    match model_assessment(input, generator, &context).await {
        Ok(assessment) => {
            info!(
                "Model assessment complete: overall={} method={}",
                assessment.overall_score,
                method.as_str()
            );
            Ok(assessment)
        }
        Err(e) => {
            warn!("Model assessment unusable, using heuristic fallback: {e}");
            Ok(score_fallback(input, assessed_at))
        }
    }
}

async fn model_assessment(
    input: &AssessmentInput,
    generator: &dyn TextGenerator,
    context: &AssessmentContext,
) -> Result<Assessment, PipelineError> {
    let prompt = build_assessment_prompt(input, context.method);
    let response = generator.generate(&prompt).await?;
    ingest_assessment_response(&response, context)
}

/// extract → repair/parse → validate over one model response.
pub fn ingest_assessment_response(
    response: &str,
    context: &AssessmentContext,
) -> Result<Assessment, PipelineError> {
    let payload = extract_json(response)?;
    let value = parse_with_repair(payload)?;
    Ok(validate_assessment(&value, context)?)
}

pub fn build_assessment_prompt(input: &AssessmentInput, method: AssessmentMethod) -> String {
    let resume_section = input
        .resume()
        .map(|text| RESUME_SECTION_TEMPLATE.replace("{resume_text}", text))
        .unwrap_or_default();

    let questionnaire_section = input
        .answers()
        .and_then(|answers| serde_json::to_string_pretty(answers).ok())
        .map(|json| QUESTIONNAIRE_SECTION_TEMPLATE.replace("{answers_json}", &json))
        .unwrap_or_default();

    ASSESSMENT_PROMPT_TEMPLATE
        .replace("{scoring_instruction}", SCORING_INSTRUCTION)
        .replace("{method}", method.as_str())
        .replace("{resume_section}", &resume_section)
        .replace("{questionnaire_section}", &questionnaire_section)
}

// ────────────────────────────────────────────────────────────────────────────
// Profile persistence
// ────────────────────────────────────────────────────────────────────────────

/// Assesses, stores the result as the profile's active assessment, appends it
/// to history, and drops the plan cached for the assessment it supersedes.
pub async fn assess_and_record(
    profile_id: Uuid,
    input: &AssessmentInput,
    generator: &dyn TextGenerator,
    store: &dyn ProfileStore,
    plans: &PlanCache,
    assessed_at: DateTime<Utc>,
) -> Result<Assessment, AppError> {
    let assessment = assess(input, generator, assessed_at).await?;

    if let Some(previous) = record_assessment(store, profile_id, &assessment).await? {
        plans.invalidate(&previous.fingerprint());
    }

    info!(
        "Recorded assessment {} for profile {}",
        assessment.fingerprint(),
        profile_id
    );
    Ok(assessment)
}

/// Writes `assessment` as active and appends it to history. Returns the
/// assessment it replaced, if any.
pub async fn record_assessment(
    store: &dyn ProfileStore,
    profile_id: Uuid,
    assessment: &Assessment,
) -> Result<Option<Assessment>, ProfileError> {
    let previous = current_assessment(store, profile_id).await?;

    let mut history = assessment_history(store, profile_id).await?;
    history.push(assessment.clone());

    write_typed(store, profile_id, ASSESSMENT_HISTORY_KEY, &history).await?;
    write_typed(store, profile_id, ASSESSMENT_KEY, assessment).await?;
    Ok(previous)
}

pub async fn current_assessment(
    store: &dyn ProfileStore,
    profile_id: Uuid,
) -> Result<Option<Assessment>, ProfileError> {
    read_typed(store, profile_id, ASSESSMENT_KEY).await
}

pub async fn assessment_history(
    store: &dyn ProfileStore,
    profile_id: Uuid,
) -> Result<Vec<Assessment>, ProfileError> {
    Ok(read_typed(store, profile_id, ASSESSMENT_HISTORY_KEY)
        .await?
        .unwrap_or_default())
}
