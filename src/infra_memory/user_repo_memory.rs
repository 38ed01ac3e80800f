use crate::application_port::AuthError;
use crate::domain_model::UserId;
use crate::domain_port::{CredentialRecord, UserRepo};
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

#[derive(Default)]
pub struct MemoryUserRepo {
    by_email: DashMap<String, CredentialRecord>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(
        &self,
        user_id: UserId,
        email: &str,
        password_hash: &str,
    ) -> Result<(), AuthError> {
        // Entry occupancy is this backend's uniqueness constraint: the
        // shard lock makes check-and-insert a single step.
        match self.by_email.entry(email.to_owned()) {
            Entry::Occupied(_) => Err(AuthError::EmailTaken),
            Entry::Vacant(slot) => {
                slot.insert(CredentialRecord {
                    user_id,
                    email: email.to_owned(),
                    password_hash: password_hash.to_owned(),
                    created_at: Utc::now(),
                });
                Ok(())
            }
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, AuthError> {
        Ok(self.by_email.get(email).map(|rec| rec.value().clone()))
    }
}
