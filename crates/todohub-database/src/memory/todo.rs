//! In-memory todo repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use todohub_core::result::AppResult;
use todohub_core::types::{PageRequest, TodoId, UserId};
use todohub_entity::Todo;

use crate::repositories::TodoRepository;

/// [`TodoRepository`] over a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryTodoRepository {
    todos: DashMap<TodoId, Todo>,
}

impl MemoryTodoRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn find_by_owner(&self, owner: UserId, page: &PageRequest) -> AppResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self
            .todos
            .iter()
            .filter(|t| t.owner_id == owner)
            .map(|t| t.value().clone())
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let skipped = todos.into_iter().skip(page.offset as usize);
        Ok(match page.limit {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        })
    }

    async fn count_by_owner(&self, owner: UserId) -> AppResult<u64> {
        Ok(self.todos.iter().filter(|t| t.owner_id == owner).count() as u64)
    }

    async fn find_by_id(&self, id: TodoId) -> AppResult<Option<Todo>> {
        Ok(self.todos.get(&id).map(|t| t.value().clone()))
    }

    async fn create(&self, owner: UserId, description: &str) -> AppResult<Todo> {
        let todo = Todo {
            id: TodoId::new(),
            owner_id: owner,
            description: description.to_string(),
            created_at: Utc::now(),
        };
        self.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update_description(&self, id: TodoId, description: &str) -> AppResult<Option<Todo>> {
        Ok(self.todos.get_mut(&id).map(|mut t| {
            t.description = description.to_string();
            t.value().clone()
        }))
    }

    async fn delete(&self, id: TodoId) -> AppResult<bool> {
        Ok(self.todos.remove(&id).is_some())
    }

    async fn delete_by_owner(&self, owner: UserId) -> AppResult<u64> {
        let before = self.todos.len();
        self.todos.retain(|_, t| t.owner_id != owner);
        Ok(before.saturating_sub(self.todos.len()) as u64)
    }
}
