#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App, Error};
use serde_json::{json, Value};
use tasktrek::auth::{AuthMiddleware, PasswordHasher, TokenCodec};
use tasktrek::routes::{self, health};
use tasktrek::state::AppState;
use tasktrek::store::MemoryStore;

pub const TEST_SECRET: &str = "test-secret";

/// Lowest cost bcrypt accepts; keeps the suite fast.
pub const TEST_COST: u32 = 4;

pub fn test_codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(TEST_SECRET).expect("test secret is not empty"))
}

/// Builds the application the same way `main` does, backed by an empty
/// in-memory store.
pub async fn init_app(
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    init_app_with_cost(TEST_COST).await
}

/// Same as [`init_app`] with a chosen bcrypt cost.
pub async fn init_app_with_cost(
    cost: u32,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let codec = test_codec();
    let state = web::Data::new(AppState::new(
        Arc::new(MemoryStore::new()),
        codec.clone(),
        PasswordHasher::new(cost),
        false,
    ));

    test::init_service(
        App::new()
            .app_data(state)
            .wrap(routes::cors())
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(codec))
                    .configure(routes::config),
            ),
    )
    .await
}

/// Registers an account and returns the response body.
pub async fn register<S, B>(app: &S, email: &str, password: &str, name: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": email, "password": password, "name": name }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    test::read_body_json(resp).await
}

/// Registers an account and returns its id and bearer token.
pub async fn register_token<S, B>(app: &S, email: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let body = register(app, email, "pw123", "Tester").await;
    (
        body["id"].as_str().expect("id in body").to_string(),
        body["token"].as_str().expect("token in body").to_string(),
    )
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
