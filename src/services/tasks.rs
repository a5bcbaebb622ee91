use std::sync::Arc;

use log::{error, info};

use crate::error::AppError;
use crate::models::{TaskId, TaskResponse, UserId};
use crate::repository::TaskRepository;
use crate::validation::validate_task;

/// Owner-scoped task operations.
///
/// The `owner` argument must come from a verified credential. Tasks of any
/// other owner behave as if they did not exist.
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

fn not_found(id: TaskId) -> AppError {
    AppError::NotFound(format!("task {}", id))
}

fn log_storage(op: &str, err: AppError) -> AppError {
    if let AppError::Storage(msg) = &err {
        error!("{} failed: {}", op, msg);
    }
    err
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    /// Tasks of `owner` in creation order; empty when there are none.
    pub async fn list(&self, owner: UserId) -> Result<Vec<TaskResponse>, AppError> {
        let tasks = self
            .repo
            .list_by_owner(owner)
            .await
            .map_err(|e| log_storage("list tasks", e))?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    pub async fn get(&self, owner: UserId, id: TaskId) -> Result<TaskResponse, AppError> {
        self.repo
            .find_by_owner_and_id(owner, id)
            .await
            .map_err(|e| log_storage("get task", e))?
            .map(TaskResponse::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, owner: UserId, title: &str) -> Result<TaskResponse, AppError> {
        validate_task(title)?;
        let task = self
            .repo
            .create(owner, title)
            .await
            .map_err(|e| log_storage("create task", e))?;
        info!("user {} created task {}", owner, task.id);
        Ok(task.into())
    }

    /// Fails with `NotFound` when no task of `owner` has this id.
    pub async fn update(
        &self,
        owner: UserId,
        id: TaskId,
        title: &str,
    ) -> Result<TaskResponse, AppError> {
        validate_task(title)?;
        self.repo
            .update_title(owner, id, title)
            .await
            .map_err(|e| log_storage("update task", e))?
            .map(TaskResponse::from)
            .ok_or_else(|| not_found(id))
    }

    /// Fails with `NotFound` when no task of `owner` has this id, the same
    /// policy as `update`.
    pub async fn delete(&self, owner: UserId, id: TaskId) -> Result<(), AppError> {
        let removed = self
            .repo
            .delete(owner, id)
            .await
            .map_err(|e| log_storage("delete task", e))?;
        if removed == 0 {
            return Err(not_found(id));
        }
        info!("user {} deleted task {}", owner, id);
        Ok(())
    }
}
