use crate::{
    auth::{
        cookie::{removal_cookie, session_cookie},
        AuthResponse, LoginRequest, RegisterRequest,
    },
    error::AppError,
    models::User,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use log::{debug, info};
use validator::Validate;

/// Same message for unknown email and wrong password, so callers cannot probe
/// which accounts exist.
fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

/// Register a new account
///
/// Hashes the password, stores the account and returns a session token in
/// both the body and the `token` cookie.
///
/// ## Responses:
/// - `201 Created`: `AuthResponse` JSON.
/// - `400 Bad Request`: Body is not valid JSON or misses fields.
/// - `409 Conflict`: Email already registered.
/// - `422 Unprocessable Entity`: Validation failed.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;
    let RegisterRequest {
        email,
        password,
        name,
    } = register_data.into_inner();

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hasher = state.hasher;
    let password_hash = web::block(move || hasher.hash(&password)).await??;

    let user = User::new(email, name, password_hash);
    state.store.insert_user(&user).await?;

    let token = state.codec.issue(&user.id.to_string())?;
    info!("Registered account {}", user.id);

    Ok(HttpResponse::Created()
        .cookie(session_cookie(&token, state.secure_cookies))
        .json(AuthResponse::new(&user, token)))
}

/// Login
///
/// Verifies the credentials and returns a fresh session token.
///
/// ## Responses:
/// - `200 OK`: `AuthResponse` JSON.
/// - `401 Unauthorized`: Unknown email or wrong password.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;
    let LoginRequest { email, password } = login_data.into_inner();

    let account = state.store.find_user_by_email(&email).await?;

    // Unknown emails still go through bcrypt so both failures take as long.
    let hasher = state.hasher;
    let stored_hash = account.as_ref().map(|user| user.password_hash.clone());
    let matches =
        web::block(move || hasher.check(stored_hash.as_deref(), &password)).await?;

    let user = match account {
        Some(user) if matches => user,
        Some(user) => {
            debug!("Wrong password for account {}", user.id);
            return Err(invalid_credentials());
        }
        None => {
            debug!("Login attempt for unknown email");
            return Err(invalid_credentials());
        }
    };

    let token = state.codec.issue(&user.id.to_string())?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token, state.secure_cookies))
        .json(AuthResponse::new(&user, token)))
}

/// Logout
///
/// Clears the session cookie. The token itself stays valid until it expires.
#[post("/logout")]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::NoContent()
        .cookie(removal_cookie(state.secure_cookies))
        .finish()
}
