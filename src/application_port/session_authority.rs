use crate::application_port::AuthError;
use crate::domain_model::Identity;

#[async_trait::async_trait]
pub trait SessionAuthority: Send + Sync {
    /// Resolve a session assertion to an identity. A missing, unknown, or
    /// expired assertion resolves to `Identity::Anonymous`; only a store
    /// failure is an error.
    async fn resolve_identity(&self, assertion: Option<&str>) -> Result<Identity, AuthError>;

    /// Drop the session record behind an assertion. Unknown assertions are
    /// a no-op.
    async fn invalidate(&self, assertion: &str) -> Result<(), AuthError>;
}
