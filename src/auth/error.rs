use thiserror::Error;

/// Failures produced by the credential hasher and the token codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The signing secret is missing or empty. Blocks startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed, wrongly signed or expired token.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}
