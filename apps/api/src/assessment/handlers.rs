use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::assessment::input::{AssessmentInput, Questionnaire};
use crate::assessment::pipeline::{assess_and_record, assessment_history, current_assessment};
use crate::assessment::report::render_markdown;
use crate::assessment::score_model::Assessment;
use crate::errors::AppError;
use crate::profile::ProfileStore;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProfileQuery {
    pub profile_id: Uuid,
}

#[derive(Deserialize)]
pub struct AssessmentRequest {
    pub profile_id: Uuid,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub questionnaire: Option<Questionnaire>,
}

/// Loads the profile's active assessment or fails with 404.
pub async fn require_current_assessment(
    store: &dyn ProfileStore,
    profile_id: Uuid,
) -> Result<Assessment, AppError> {
    current_assessment(store, profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No assessment for profile {profile_id}")))
}

/// POST /api/v1/assessments
pub async fn handle_create_assessment(
    State(state): State<AppState>,
    Json(req): Json<AssessmentRequest>,
) -> Result<Json<Assessment>, AppError> {
    let input = AssessmentInput {
        resume_text: req.resume_text,
        questionnaire: req.questionnaire,
    };
    let assessment = assess_and_record(
        req.profile_id,
        &input,
        state.llm.as_ref(),
        state.profiles.as_ref(),
        &state.plans,
        Utc::now(),
    )
    .await?;
    Ok(Json(assessment))
}

/// GET /api/v1/assessments/current
pub async fn handle_current_assessment(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<Assessment>, AppError> {
    let assessment = require_current_assessment(state.profiles.as_ref(), params.profile_id).await?;
    Ok(Json(assessment))
}

/// GET /api/v1/assessments/history
pub async fn handle_assessment_history(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<Vec<Assessment>>, AppError> {
    let history = assessment_history(state.profiles.as_ref(), params.profile_id).await?;
    Ok(Json(history))
}

/// GET /api/v1/assessments/current/report
pub async fn handle_assessment_report(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = require_current_assessment(state.profiles.as_ref(), params.profile_id).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_markdown(&assessment),
    ))
}
