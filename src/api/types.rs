//! Shared types for the HTTP API layer.

use std::sync::Arc;

use crate::auth::SessionRegistry;
use crate::models::User;
use crate::service::HealthService;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<HealthService>,
    pub sessions: Arc<SessionRegistry>,
}

impl ApiContext {
    pub fn new(service: Arc<HealthService>) -> Self {
        Self {
            service,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}

/// Authenticated caller, injected into request extensions by the auth
/// middleware after the bearer token resolves.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user: User,
    /// Plaintext bearer token of this request, kept for logout.
    pub token: String,
}
