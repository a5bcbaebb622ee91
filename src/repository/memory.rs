//! In-process store implementing both repositories.
//!
//! Holds the same guarantees the Postgres schema gives: unique emails,
//! tasks referencing an existing user, owner-filtered access, and listing in
//! creation order. Every call takes the lock once, so each operation is atomic
//! with respect to the others.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Task, TaskId, User, UserId};

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    tasks: BTreeMap<TaskId, Task>,
    next_user_id: i64,
    next_task_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == email) {
            return Err(AppError::Storage(
                "duplicate key value violates unique constraint \"users_email_key\"".into(),
            ));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: UserId(tables.next_user_id),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Task>, AppError> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.created_at, t.id));
        Ok(tasks)
    }

    async fn find_by_owner_and_id(
        &self,
        owner: UserId,
        id: TaskId,
    ) -> Result<Option<Task>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .get(&id)
            .filter(|t| t.user_id == owner)
            .cloned())
    }

    async fn create(&self, owner: UserId, title: &str) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner) {
            return Err(AppError::Storage(
                "insert or update on table \"tasks\" violates foreign key constraint".into(),
            ));
        }

        tables.next_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: TaskId(tables.next_task_id),
            title: title.to_string(),
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_title(
        &self,
        owner: UserId,
        id: TaskId,
        title: &str,
    ) -> Result<Option<Task>, AppError> {
        let mut tables = self.tables.write().await;
        let task = match tables.tasks.get_mut(&id).filter(|t| t.user_id == owner) {
            Some(task) => task,
            None => return Ok(None),
        };
        task.title = title.to_string();
        task.updated_at = Utc::now().max(task.created_at);
        Ok(Some(task.clone()))
    }

    async fn delete(&self, owner: UserId, id: TaskId) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        let owned = tables.tasks.get(&id).is_some_and(|t| t.user_id == owner);
        if owned {
            tables.tasks.remove(&id);
            Ok(1)
        } else {
            Ok(0)
        }
    }
}
