use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskQuery, TaskUpdate},
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Loads a task and checks it belongs to `owner`.
///
/// Someone else's task is reported exactly like a missing one so ids of
/// other accounts' tasks are not revealed.
async fn owned_task(state: &AppState, task_id: Uuid, owner: Uuid) -> Result<Task, AppError> {
    match state.store.find_task(task_id).await? {
        Some(task) if task.user_id == owner => Ok(task),
        _ => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Query Parameters:
/// - `status` (optional): `todo`, `in-progress` or `done`.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized`: Missing or invalid token.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    query_params: web::Query<TaskQuery>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let owner = user.account_id()?;
    let tasks = state.store.list_tasks(owner, query_params.status).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1 to 200 characters.
/// - `memo` (optional): at most 1000 characters, defaults to empty.
/// - `status` (optional): defaults to `todo`.
///
/// ## Responses:
/// - `201 Created`: The new `Task`.
/// - `404 Not Found`: The account behind the token has been deleted.
/// - `422 Unprocessable Entity`: Validation failed.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let owner = user.account_id()?;

    // Tokens outlive deleted accounts; never store a task without an owner.
    if state.store.find_user(owner).await?.is_none() {
        return Err(AppError::NotFound("User not found".into()));
    }

    let task = Task::new(task_data.into_inner(), owner);
    state.store.insert_task(&task).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `400 Bad Request`: `id` is not a UUID.
/// - `404 Not Found`: No such task, or owned by someone else.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = owned_task(&state, task_id.into_inner(), user.account_id()?).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Fields left out of the body keep their value.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `404 Not Found`: No such task, or owned by someone else.
/// - `422 Unprocessable Entity`: Validation failed.
#[patch("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let mut task = owned_task(&state, task_id.into_inner(), user.account_id()?).await?;
    task.apply(task_data.into_inner());

    if !state.store.update_task(&task).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `204 No Content`: Deleted.
/// - `404 Not Found`: No such task, or owned by someone else.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = owned_task(&state, task_id.into_inner(), user.account_id()?).await?;

    if !state.store.delete_task(task.id).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
