use async_trait::async_trait;
use sqlx::PgPool;

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Task, TaskId, User, UserId};

const TASK_COLUMNS: &str = "id, title, user_id, created_at, updated_at";
const USER_COLUMNS: &str = "id, email, password, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at, id",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_by_owner_and_id(
        &self,
        owner: UserId,
        id: TaskId,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 AND id = $2",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn create(&self, owner: UserId, title: &str) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks (title, user_id) VALUES ($1, $2) RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(title)
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update_title(
        &self,
        owner: UserId,
        id: TaskId,
        title: &str,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE tasks SET title = $1, updated_at = NOW() \
             WHERE user_id = $2 AND id = $3 RETURNING {}",
            TASK_COLUMNS
        );
        // One statement; an empty result means zero rows were affected.
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(title)
            .bind(owner)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete(&self, owner: UserId, id: TaskId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE user_id = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
