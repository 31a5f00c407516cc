use std::sync::Arc;

use crate::auth::{JwtError, SessionCookie, TokenService};
use crate::config::AppConfig;
use crate::database::UserStore;
use crate::services::CredentialService;

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub credentials: Arc<CredentialService>,
    pub tokens: Arc<TokenService>,
    pub session_cookie: SessionCookie,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn UserStore>) -> Result<Self, JwtError> {
        let tokens = Arc::new(TokenService::new(&config.security.jwt_secret)?);
        let credentials = Arc::new(CredentialService::new(
            store.clone(),
            tokens.clone(),
            config.security.bcrypt_cost,
        ));

        Ok(Self {
            store,
            credentials,
            tokens,
            session_cookie: SessionCookie::for_environment(&config.environment),
        })
    }
}
