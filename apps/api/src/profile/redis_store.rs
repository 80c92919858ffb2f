use async_trait::async_trait;
use redis::AsyncCommands;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::profile::{ProfileError, ProfileStore};

const KEY_PREFIX: &str = "skillpath:profile";

/// Redis-backed profile store. Each field is one JSON string value under
/// `skillpath:profile:{profile_id}:{key}`.
#[derive(Clone)]
pub struct RedisProfileStore {
    client: redis::Client,
}

impl RedisProfileStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    pub fn open(redis_url: &str) -> Result<Self, ProfileError> {
        Ok(Self::new(redis::Client::open(redis_url)?))
    }
}

pub(crate) fn field_key(profile_id: Uuid, key: &str) -> String {
    format!("{KEY_PREFIX}:{profile_id}:{key}")
}

#[async_trait]
impl ProfileStore for RedisProfileStore {
    async fn read_field(&self, profile_id: Uuid, key: &str) -> Result<Option<Value>, ProfileError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(field_key(profile_id, key)).await?;
        debug!("Profile read {}:{} hit={}", profile_id, key, raw.is_some());
        raw.map(|s| serde_json::from_str(&s))
            .transpose()
            .map_err(ProfileError::from)
    }

    async fn write_field(
        &self,
        profile_id: Uuid,
        key: &str,
        value: Value,
    ) -> Result<(), ProfileError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(&value)?;
        let _: () = conn.set(field_key(profile_id, key), payload).await?;
        debug!("Profile write {}:{}", profile_id, key);
        Ok(())
    }
}
