use crate::{
    auth::{cookie::removal_cookie, AuthenticatedUser},
    error::AppError,
    models::UserUpdate,
    state::AppState,
};
use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use log::info;
use uuid::Uuid;
use validator::Validate;

/// Accounts can only be read or changed by their owner. Any other id is
/// answered with 404.
fn ensure_self(user: &AuthenticatedUser, id: Uuid) -> Result<Uuid, AppError> {
    if user.account_id()? == id {
        Ok(id)
    } else {
        Err(AppError::NotFound("User not found".into()))
    }
}

#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = ensure_self(&user, user_id.into_inner())?;
    let account = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(account))
}

/// Updates the display name. Returns the updated account.
#[patch("/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
    update: web::Json<UserUpdate>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    update.validate()?;
    let id = ensure_self(&user, user_id.into_inner())?;

    let mut account = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    account.apply(update.into_inner());

    if !state.store.update_user(&account).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(HttpResponse::Ok().json(account))
}

/// Deletes the account and its tasks, and clears the session cookie.
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = ensure_self(&user, user_id.into_inner())?;

    if !state.store.delete_user(id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }
    info!("Deleted account {}", id);

    Ok(HttpResponse::NoContent()
        .cookie(removal_cookie(state.secure_cookies))
        .finish())
}
