use crate::application_port::{AuthError, SessionAuthority};
use crate::domain_model::Identity;
use crate::domain_port::SessionStore;
use std::sync::Arc;

pub struct RealSessionAuthority {
    session_store: Arc<dyn SessionStore>,
}

impl RealSessionAuthority {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }
}

#[async_trait::async_trait]
impl SessionAuthority for RealSessionAuthority {
    async fn resolve_identity(&self, assertion: Option<&str>) -> Result<Identity, AuthError> {
        let Some(session_id) = assertion else {
            return Ok(Identity::Anonymous);
        };

        match self.session_store.load(session_id).await? {
            Some(email) => Ok(Identity::User(email)),
            None => Ok(Identity::Anonymous),
        }
    }

    async fn invalidate(&self, assertion: &str) -> Result<(), AuthError> {
        self.session_store.delete(assertion).await
    }
}
