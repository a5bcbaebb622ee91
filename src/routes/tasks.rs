use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskId, TaskInput},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists the caller's tasks, oldest first.
///
/// ## Responses:
/// - `200 OK`: JSON array of task summaries (possibly empty).
/// - `401 Unauthorized`: missing or invalid credential.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list(user.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller.
///
/// Only `title` is read from the body; the owner is always the caller.
///
/// ## Responses:
/// - `201 Created`: the new task summary.
/// - `400 Bad Request`: title missing or longer than 100 characters.
/// - `401 Unauthorized`: missing or invalid credential.
/// - `500 Internal Server Error`: storage failure.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = state.tasks.create(user.0, &body.title).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Fetches one of the caller's tasks. A task owned by someone else is
/// reported exactly like a missing one.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = state.tasks.get(user.0, TaskId(task_id.into_inner())).await?;
    Ok(HttpResponse::Ok().json(task))
}

#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .update(user.0, TaskId(task_id.into_inner()), &body.title)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state
        .tasks
        .delete(user.0, TaskId(task_id.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().finish())
}
