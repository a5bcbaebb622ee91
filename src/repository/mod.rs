//! Storage access for users and tasks.
//!
//! Every task operation takes the owner's identity as an explicit filter. A
//! task that exists but belongs to someone else is indistinguishable from one
//! that does not exist.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Task, TaskId, User, UserId};

pub use memory::MemoryStore;
pub use postgres::{PgTaskRepository, PgUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Inserts a user. A duplicate email is a storage error.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks of `owner`, oldest first.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Task>, AppError>;

    async fn find_by_owner_and_id(&self, owner: UserId, id: TaskId)
        -> Result<Option<Task>, AppError>;

    async fn create(&self, owner: UserId, title: &str) -> Result<Task, AppError>;

    /// Sets the title of the task matching both `owner` and `id`. Returns the
    /// updated row, or `None` when no row matched.
    async fn update_title(
        &self,
        owner: UserId,
        id: TaskId,
        title: &str,
    ) -> Result<Option<Task>, AppError>;

    /// Deletes the task matching both `owner` and `id`; returns the number of
    /// rows removed.
    async fn delete(&self, owner: UserId, id: TaskId) -> Result<u64, AppError>;
}
