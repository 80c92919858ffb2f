pub mod handlers;
pub mod parser;
pub mod prompts;

use uuid::Uuid;

use crate::llm_client::TextGenerator;
use crate::profile::{write_typed, ProfileError, ProfileStore, GOALS_KEY};
use parser::{parse_goals, GoalParseResult};

/// Parses goals and, on success, stores them as the profile's goals. A failed
/// parse leaves previously stored goals untouched.
pub async fn parse_and_record_goals(
    profile_id: Uuid,
    text: &str,
    generator: &dyn TextGenerator,
    store: &dyn ProfileStore,
) -> Result<GoalParseResult, ProfileError> {
    let result = parse_goals(text, generator).await;
    if result.success {
        write_typed(store, profile_id, GOALS_KEY, &result.goals).await?;
    }
    Ok(result)
}
