use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// The subject id of the request's verified token.
///
/// `AuthMiddleware` inserts this into request extensions once the token has
/// been verified; handlers take it as an argument to learn who is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn subject(&self) -> &str {
        &self.0
    }

    /// Account id carried by the token.
    pub fn account_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0)
            .map_err(|_| AppError::Unauthorized("Token subject is not an account id".into()))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                // Reaching this means the route is not wrapped by AuthMiddleware.
                let err = AppError::Unauthorized(
                    "User ID not found in request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let id = Uuid::new_v4();
        let req = TestRequest::default().to_http_request();
        req.extensions_mut()
            .insert(AuthenticatedUser(id.to_string()));

        let mut payload = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(extracted.subject(), id.to_string());
        assert_eq!(extracted.account_id().unwrap(), id);
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failure() {
        let req = TestRequest::default().to_http_request();

        let mut payload = Payload::None;
        let result = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let response = result.unwrap_err().error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_non_uuid_subject() {
        let user = AuthenticatedUser("not-a-uuid".into());
        assert!(matches!(user.account_id(), Err(AppError::Unauthorized(_))));
    }
}
