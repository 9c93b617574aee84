use crate::{
    app_state::AppState,
    auth::AuthenticatedUserId,
    error::AppError,
    models::{TaskCreateRequest, TaskPatchRequest, TaskUpdateRequest},
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use validator::Validate;

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

/// Retrieves the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks in creation order, status rendered by name.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_for_user(user_id.0)?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The owner is always the authenticated user; the body cannot choose it.
///
/// ## Request Body:
/// - `title`: required, at most 200 characters.
/// - `description`: at most 1000 characters.
/// - `status`: 0 (Pending), 1 (InProgress) or 2 (Completed).
/// - `dueDate`: required, strictly in the future.
///
/// ## Responses:
/// - `201 Created`: The created task.
/// - `400 Bad Request`: If validation fails.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<TaskCreateRequest>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state.tasks.create(task_data.into_inner(), user_id.0)?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: The task, if it exists and is owned by the caller.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    task_id: web::Path<i32>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .get(task_id.into_inner(), user_id.0)?
        .ok_or_else(task_not_found)?;
    Ok(HttpResponse::Ok().json(task))
}

/// Replaces title, description, status and due date of a task.
///
/// ## Responses:
/// - `200 OK`: The updated task.
/// - `400 Bad Request`: If validation fails.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or belongs to another user.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskUpdateRequest>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state
        .tasks
        .update_full(task_id.into_inner(), task_data.into_inner(), user_id.0)?
        .ok_or_else(task_not_found)?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates only the fields present in the body.
///
/// An empty `title` is ignored. Omitted fields keep their stored values.
#[patch("/{id}")]
pub async fn patch_task(
    state: web::Data<AppState>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskPatchRequest>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state
        .tasks
        .update_partial(task_id.into_inner(), task_data.into_inner(), user_id.0)?
        .ok_or_else(task_not_found)?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<i32>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    if !state.tasks.delete(task_id.into_inner(), user_id.0)? {
        return Err(task_not_found());
    }

    Ok(HttpResponse::NoContent().finish())
}
