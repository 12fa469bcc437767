use crate::{auth::AuthenticatedUser, error::AppError, state::AppState};
use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

/// Returns the subject id of the caller's token.
#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(json!({ "userId": user.subject() }))
}

/// The caller's account together with all of its tasks.
///
/// ## Responses:
/// - `200 OK`: `{"user": User, "tasks": [Task]}`.
/// - `404 Not Found`: The account behind the token has been deleted.
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let account_id = user.account_id()?;

    let account = state
        .store
        .find_user(account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let tasks = state.store.list_tasks(account_id, None).await?;

    Ok(HttpResponse::Ok().json(json!({ "user": account, "tasks": tasks })))
}
