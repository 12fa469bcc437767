use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenCodec};
use crate::store::Store;

/// Shared application state handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub codec: Arc<TokenCodec>,
    pub hasher: PasswordHasher,
    /// Whether session cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        codec: Arc<TokenCodec>,
        hasher: PasswordHasher,
        secure_cookies: bool,
    ) -> Self {
        Self {
            store,
            codec,
            hasher,
            secure_cookies,
        }
    }
}
