use bcrypt::{hash, verify, DEFAULT_COST};
use log::warn;

use super::AuthError;

/// Turns plaintext passwords into bcrypt hashes and checks them later.
///
/// Every call to [`PasswordHasher::hash`] draws a fresh salt, so hashing the
/// same password twice yields two different strings that both verify.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        hash(password, self.cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Checks `password` against a stored hash.
    ///
    /// A mismatch is a plain `false`. A stored hash bcrypt cannot parse is
    /// logged and also reported as `false`.
    pub fn verify(&self, hashed_password: &str, password: &str) -> bool {
        match verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Stored password hash could not be checked: {}", e);
                false
            }
        }
    }
}

impl PasswordHasher {
    /// Checks a login attempt against the account's stored hash, if any.
    ///
    /// Without a stored hash a throwaway hash is computed at the same cost
    /// and `false` is returned, so a missing account costs as much time as a
    /// wrong password.
    pub fn check(&self, stored_hash: Option<&str>, password: &str) -> bool {
        match stored_hash {
            Some(hashed_password) => self.verify(hashed_password, password),
            None => {
                let _ = self.hash(password);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
