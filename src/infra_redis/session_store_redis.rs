use crate::application_port::AuthError;
use crate::domain_port::SessionStore;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// Session records as prefixed redis keys with a TTL: expiry is redis's
/// problem, `load` after the TTL simply misses.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisSessionStore {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, session_id: &str) -> String {
        format!("{}:{}", self.prefix, session_id)
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, session_id: &str, email: &str, ttl_secs: u64) -> Result<(), AuthError> {
        let key = self.key(session_id);
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(&key, email, ttl_secs)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<String>, AuthError> {
        let key = self.key(session_id);
        let mut conn = self.conn.clone();
        let email: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(email)
    }

    async fn delete(&self, session_id: &str) -> Result<(), AuthError> {
        let key = self.key(session_id);
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }
}
