use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use super::authenticator::{AuthOutcome, Authenticator};
use super::extractors::AuthenticatedUser;
use super::token::TokenCodec;
use crate::error::AppError;

/// Paths under the protected scope that stay reachable without a token.
const PUBLIC_PATHS: &[&str] = &[
    "/api/health",
    "/api/auth/register",
    "/api/auth/login",
    "/api/auth/logout",
];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path.trim_end_matches('/'))
}

/// Gates every route it wraps behind a valid session token.
///
/// On success the subject id is stored as [`AuthenticatedUser`] in the
/// request extensions. On rejection a 401 is returned and the wrapped
/// handler never runs.
pub struct AuthMiddleware {
    authenticator: Authenticator,
}

impl AuthMiddleware {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self {
            authenticator: Authenticator::new(codec),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            authenticator: self.authenticator.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    authenticator: Authenticator,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) });
        }

        match self.authenticator.authenticate(req.request()) {
            AuthOutcome::Authenticated(subject) => {
                req.extensions_mut().insert(AuthenticatedUser(subject));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            AuthOutcome::Rejected(rejection) => {
                let response = AppError::Unauthorized(rejection.message().into()).error_response();
                let res = req.into_response(response).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
