//! In-memory user repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use todohub_core::error::AppError;
use todohub_core::result::AppResult;
use todohub_core::types::UserId;
use todohub_entity::user::{CreateUser, UpdateUser, User};

use crate::repositories::UserRepository;

/// [`UserRepository`] over concurrent maps.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: DashMap<UserId, User>,
    /// Name -> id; its entry lock enforces name uniqueness.
    names: DashMap<String, UserId>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        let id = match self.names.get(name) {
            Some(id) => *id.value(),
            None => return Ok(None),
        };
        self.find_by_id(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        match self.names.entry(data.name.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Name '{}' is already taken",
                data.name
            ))),
            Entry::Vacant(slot) => {
                let user = User {
                    id: UserId::new(),
                    name: data.name,
                    password_hash: data.password_hash,
                    role: data.role,
                    created_at: Utc::now(),
                };
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn update(&self, id: UserId, data: UpdateUser) -> AppResult<Option<User>> {
        let current = match self.users.get(&id) {
            Some(u) => u.value().clone(),
            None => return Ok(None),
        };

        if let Some(new_name) = data.name.as_ref().filter(|n| **n != current.name) {
            match self.names.entry(new_name.clone()) {
                Entry::Occupied(_) => return Err(AppError::conflict("Name is already taken")),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.names.remove(&current.name);
        }

        let mut entry = match self.users.get_mut(&id) {
            Some(entry) => entry,
            None => return Ok(None),
        };
        if let Some(name) = data.name {
            entry.name = name;
        }
        if let Some(hash) = data.password_hash {
            entry.password_hash = hash;
        }
        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.names.remove(&user.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
