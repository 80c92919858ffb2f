use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::goals::parse_and_record_goals;
use crate::goals::parser::GoalParseResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GoalParseRequest {
    pub profile_id: Uuid,
    pub text: String,
}

/// POST /api/v1/goals/parse
///
/// A failed parse is still a 200: the body carries `success: false` and
/// suggestions for rephrasing.
pub async fn handle_parse_goals(
    State(state): State<AppState>,
    Json(req): Json<GoalParseRequest>,
) -> Result<Json<GoalParseResult>, AppError> {
    let result = parse_and_record_goals(
        req.profile_id,
        &req.text,
        state.llm.as_ref(),
        state.profiles.as_ref(),
    )
    .await?;
    Ok(Json(result))
}
