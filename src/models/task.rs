use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::UserId;
use crate::validation::not_empty;

/// System-assigned identity of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct TaskId(pub i64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a task row as stored in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Owner of the task; fixed at creation.
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of task create and update requests.
///
/// Only the title is read. Any owner field a client sends is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[serde(default)]
    #[validate(
        custom(function = "not_empty", code = "required", message = "title is requred"),
        length(max = 100, message = "limited max 100 char")
    )]
    pub title: String,
}

/// Task summary returned to clients. The owner identity is never exposed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
