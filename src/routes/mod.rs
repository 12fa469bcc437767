pub mod auth;
pub mod dashboard;
pub mod health;
pub mod tasks;
pub mod users;

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use actix_web::web;

use crate::error::AppError;

/// Registers every route under the `/api` scope.
///
/// The scope is expected to be wrapped in `AuthMiddleware`; the auth and
/// health endpoints are let through by its public path list.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(health::health)
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login)
                .service(auth::logout),
        )
        .service(dashboard::me)
        .service(dashboard::dashboard)
        .service(
            web::scope("/tasks")
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        )
        .service(
            web::scope("/users")
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user),
        );
}

/// CORS policy for a browser frontend that sends the session cookie.
pub fn cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_origin, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
        ])
        .supports_credentials()
        .max_age(12 * 60 * 60)
}

/// Malformed JSON bodies and missing fields become 400s with a JSON body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid request body: {}", err)).into())
}

/// Path segments that are not valid ids become 400s rather than 404s.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid id: {}", err)).into())
}
