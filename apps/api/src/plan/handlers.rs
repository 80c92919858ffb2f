use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::assessment::handlers::{require_current_assessment, ProfileQuery};
use crate::errors::AppError;
use crate::plan::model::ImprovementPlan;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegenerateRequest {
    pub profile_id: Uuid,
}

/// GET /api/v1/plans/current
pub async fn handle_current_plan(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<ImprovementPlan>, AppError> {
    let assessment = require_current_assessment(state.profiles.as_ref(), params.profile_id).await?;
    let plan = state.plans.derive_plan(&assessment);
    Ok(Json(ImprovementPlan::clone(&plan)))
}

/// POST /api/v1/plans/regenerate
pub async fn handle_regenerate_plan(
    State(state): State<AppState>,
    Json(req): Json<RegenerateRequest>,
) -> Result<Json<ImprovementPlan>, AppError> {
    let assessment = require_current_assessment(state.profiles.as_ref(), req.profile_id).await?;
    let plan = state.plans.regenerate(&assessment);
    Ok(Json(ImprovementPlan::clone(&plan)))
}
