use crate::application_port::AuthError;
use crate::domain_model::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub user_id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert one credential row. The backing store enforces email
    /// uniqueness; a duplicate surfaces as `EmailTaken` even when two
    /// registrations race past the service-level pre-check.
    async fn create(
        &self,
        user_id: UserId,
        email: &str,
        password_hash: &str,
    ) -> Result<(), AuthError>;

    /// Fetch credentials by email (login and the registration pre-check).
    async fn get_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, AuthError>;
}
