use actix_web::cookie::{time::Duration, Cookie};

use super::authenticator::TOKEN_COOKIE;
use super::token::TOKEN_TTL_HOURS;

/// Builds the `token` cookie handed out on register and login.
///
/// `Secure` is only set in production so the cookie still works over plain
/// HTTP during local development.
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.to_owned())
        .path("/")
        .http_only(true)
        .secure(secure)
        .max_age(Duration::hours(TOKEN_TTL_HOURS))
        .finish()
}

/// Cookie that tells the client to drop its session token.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .max_age(Duration::ZERO)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc.def.ghi", false);

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(Duration::hours(24)));
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        assert_eq!(session_cookie("t", true).secure(), Some(true));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie(false);

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
