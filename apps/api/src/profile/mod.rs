//! Profile store: key-value persistence scoped to one profile.
//!
//! The store is always passed in explicitly; nothing in the crate reaches for
//! an ambient "current profile".

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub mod redis_store;

pub use redis_store::RedisProfileStore;

/// Active assessment for the profile.
pub const ASSESSMENT_KEY: &str = "assessment";
/// Append-only list of every assessment the profile has received.
pub const ASSESSMENT_HISTORY_KEY: &str = "assessmentHistory";
/// Goals from the last successful goal parse.
pub const GOALS_KEY: &str = "goals";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile store backend error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("Profile field serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn read_field(&self, profile_id: Uuid, key: &str) -> Result<Option<Value>, ProfileError>;

    async fn write_field(
        &self,
        profile_id: Uuid,
        key: &str,
        value: Value,
    ) -> Result<(), ProfileError>;
}

/// Reads a field and deserializes it into `T`.
pub async fn read_typed<T: DeserializeOwned>(
    store: &dyn ProfileStore,
    profile_id: Uuid,
    key: &str,
) -> Result<Option<T>, ProfileError> {
    match store.read_field(profile_id, key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn write_typed<T: Serialize>(
    store: &dyn ProfileStore,
    profile_id: Uuid,
    key: &str,
    value: &T,
) -> Result<(), ProfileError> {
    store
        .write_field(profile_id, key, serde_json::to_value(value)?)
        .await
}

/// Process-local store. Used when no Redis URL is configured, and in tests.
#[derive(Default)]
pub struct InMemoryProfileStore {
    fields: RwLock<HashMap<(Uuid, String), Value>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn read_field(&self, profile_id: Uuid, key: &str) -> Result<Option<Value>, ProfileError> {
        Ok(self
            .fields
            .read()
            .get(&(profile_id, key.to_string()))
            .cloned())
    }

    async fn write_field(
        &self,
        profile_id: Uuid,
        key: &str,
        value: Value,
    ) -> Result<(), ProfileError> {
        self.fields
            .write()
            .insert((profile_id, key.to_string()), value);
        Ok(())
    }
}
