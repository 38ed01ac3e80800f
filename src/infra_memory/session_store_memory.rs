use crate::application_port::AuthError;
use crate::domain_port::SessionStore;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct SessionEntry {
    email: String,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, SessionEntry>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, session_id: &str, email: &str, ttl_secs: u64) -> Result<(), AuthError> {
        let expires_at = Utc::now() + Duration::seconds(ttl_secs as i64);
        self.sessions.insert(
            session_id.to_owned(),
            SessionEntry {
                email: email.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<String>, AuthError> {
        let Some(entry) = self.sessions.get(session_id) else {
            return Ok(None);
        };

        if entry.expires_at <= Utc::now() {
            // Lazy expiry; the guard must go before the remove.
            drop(entry);
            self.sessions.remove(session_id);
            return Ok(None);
        }

        Ok(Some(entry.email.clone()))
    }

    async fn delete(&self, session_id: &str) -> Result<(), AuthError> {
        self.sessions.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_delete_round_trip() {
        let store = MemorySessionStore::new();

        store.save("sid", "a@x.com", 3600).await.unwrap();
        assert_eq!(store.load("sid").await.unwrap().as_deref(), Some("a@x.com"));

        store.delete("sid").await.unwrap();
        assert!(store.load("sid").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let store = MemorySessionStore::new();

        store.save("sid", "a@x.com", 0).await.unwrap();
        assert!(store.load("sid").await.unwrap().is_none());
        // And the expired record is gone, not just hidden.
        assert!(store.sessions.get("sid").is_none());
    }
}
