//! In-memory refresh-token repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use todohub_core::result::AppResult;
use todohub_core::types::{SessionId, UserId};
use todohub_entity::SessionRecord;

use crate::repositories::RefreshTokenRepository;

/// [`RefreshTokenRepository`] over concurrent maps.
///
/// `by_user` is authoritative. `by_hash` is a lookup aid and may briefly
/// hold stale digests; a lookup only succeeds when the row in `by_user`
/// still carries the digest.
#[derive(Debug, Default)]
pub struct MemoryRefreshTokenRepository {
    by_user: DashMap<UserId, SessionRecord>,
    by_hash: DashMap<String, UserId>,
}

impl MemoryRefreshTokenRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub fn len(&self) -> usize {
        self.by_user.len()
    }

    /// Whether no credential is stored.
    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AppResult<SessionRecord> {
        let record = SessionRecord {
            id: SessionId::new(),
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
        };

        // The entry guard serializes concurrent writers for the same user.
        match self.by_user.entry(user_id) {
            Entry::Occupied(mut slot) => {
                self.by_hash.remove(&slot.get().token_hash);
                self.by_hash.insert(record.token_hash.clone(), user_id);
                slot.insert(record.clone());
            }
            Entry::Vacant(slot) => {
                self.by_hash.insert(record.token_hash.clone(), user_id);
                slot.insert(record.clone());
            }
        }
        Ok(record)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<SessionRecord>> {
        let user_id = match self.by_hash.get(token_hash) {
            Some(id) => *id.value(),
            None => return Ok(None),
        };
        Ok(self
            .by_user
            .get(&user_id)
            .filter(|r| r.token_hash == token_hash)
            .map(|r| r.value().clone()))
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool> {
        let user_id = match self.by_hash.remove(token_hash) {
            Some((_, id)) => id,
            None => return Ok(false),
        };
        Ok(self
            .by_user
            .remove_if(&user_id, |_, r| r.token_hash == token_hash)
            .is_some())
    }

    async fn delete_by_user(&self, user_id: UserId) -> AppResult<bool> {
        match self.by_user.remove(&user_id) {
            Some((_, record)) => {
                self.by_hash.remove(&record.token_hash);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
