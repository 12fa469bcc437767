use std::sync::Arc;

use actix_web::{http::header, HttpRequest};
use log::debug;

use super::token::TokenCodec;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Neither a bearer header nor a token cookie was present.
    Missing,
    /// A token was found but failed verification or had expired.
    Invalid,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::Missing => "missing token",
            Rejection::Invalid => "invalid token",
        }
    }
}

/// Result of authenticating a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(String),
    Rejected(Rejection),
}

/// Decides whether a request carries a valid session token.
///
/// Holds nothing but the shared codec, so one instance serves every request.
#[derive(Clone)]
pub struct Authenticator {
    codec: Arc<TokenCodec>,
}

impl Authenticator {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn authenticate(&self, req: &HttpRequest) -> AuthOutcome {
        let token = match extract_token(req) {
            Some(token) => token,
            None => return AuthOutcome::Rejected(Rejection::Missing),
        };

        match self.codec.parse(&token) {
            Ok(claims) => AuthOutcome::Authenticated(claims.sub),
            Err(e) => {
                debug!("Rejected token for {}: {}", req.path(), e);
                AuthOutcome::Rejected(Rejection::Invalid)
            }
        }
    }
}

/// Finds a candidate token: the `Authorization: Bearer` header first, the
/// `token` cookie when the header is absent or malformed.
pub fn extract_token(req: &HttpRequest) -> Option<String> {
    bearer_token(req).or_else(|| {
        req.cookie(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    })
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::Claims;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use chrono::{Duration, Utc};

    fn authenticator() -> (Authenticator, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::new("authenticator-test-secret").unwrap());
        (Authenticator::new(codec.clone()), codec)
    }

    #[test]
    fn test_bearer_header() {
        let (auth, codec) = authenticator();
        let token = codec.issue("user-1").unwrap();
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        assert_eq!(auth.authenticate(&req), AuthOutcome::Authenticated("user-1".into()));
    }

    #[test]
    fn test_cookie_fallback() {
        let (auth, codec) = authenticator();
        let token = codec.issue("user-1").unwrap();
        let req = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, token))
            .to_http_request();

        assert_eq!(auth.authenticate(&req), AuthOutcome::Authenticated("user-1".into()));
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let (auth, codec) = authenticator();
        let header_token = codec.issue("from-header").unwrap();
        let cookie_token = codec.issue("from-cookie").unwrap();
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", header_token)))
            .cookie(Cookie::new(TOKEN_COOKIE, cookie_token))
            .to_http_request();

        assert_eq!(
            auth.authenticate(&req),
            AuthOutcome::Authenticated("from-header".into())
        );
    }

    #[test]
    fn test_malformed_header_falls_back_to_cookie() {
        let (auth, codec) = authenticator();
        let token = codec.issue("user-1").unwrap();

        for header_value in ["Basic dXNlcjpwdw==", "Bearer ", "bearer-less"] {
            let req = TestRequest::default()
                .insert_header((header::AUTHORIZATION, header_value))
                .cookie(Cookie::new(TOKEN_COOKIE, token.clone()))
                .to_http_request();

            assert_eq!(
                auth.authenticate(&req),
                AuthOutcome::Authenticated("user-1".into()),
                "header {:?} should fall back to the cookie",
                header_value
            );
        }
    }

    #[test]
    fn test_missing_token() {
        let (auth, _) = authenticator();
        let req = TestRequest::default().to_http_request();
        assert_eq!(auth.authenticate(&req), AuthOutcome::Rejected(Rejection::Missing));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .cookie(Cookie::new(TOKEN_COOKIE, ""))
            .to_http_request();
        assert_eq!(auth.authenticate(&req), AuthOutcome::Rejected(Rejection::Missing));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let (auth, codec) = authenticator();
        let past = (Utc::now() - Duration::hours(1)).timestamp();
        let token = codec
            .encode(&Claims {
                sub: "user-1".into(),
                exp: past,
                iat: past - 60,
            })
            .unwrap();
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        assert_eq!(auth.authenticate(&req), AuthOutcome::Rejected(Rejection::Invalid));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let (auth, codec) = authenticator();
        let mut token = codec.issue("user-1").unwrap();
        token.push('x');
        let req = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, token))
            .to_http_request();

        assert_eq!(auth.authenticate(&req), AuthOutcome::Rejected(Rejection::Invalid));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let (auth, _) = authenticator();
        let foreign = TokenCodec::new("some-other-secret").unwrap();
        let token = foreign.issue("user-1").unwrap();
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        assert_eq!(auth.authenticate(&req), AuthOutcome::Rejected(Rejection::Invalid));
    }
}
