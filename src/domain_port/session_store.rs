use crate::application_port::AuthError;

#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Save a session record for an identity with TTL.
    async fn save(&self, session_id: &str, email: &str, ttl_secs: u64) -> Result<(), AuthError>;

    /// Look up the identity behind a session id. Expired records read as
    /// absent.
    async fn load(&self, session_id: &str) -> Result<Option<String>, AuthError>;

    /// Remove a session record. Unknown ids are a no-op.
    async fn delete(&self, session_id: &str) -> Result<(), AuthError>;
}
