use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use std::time::Duration;

/// Composition root. Owns the one storage pool and wires every backend
/// choice; request handlers only ever see the service trait objects.
pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub session_authority: Arc<dyn SessionAuthority>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub media_service: Arc<dyn MediaAuthService>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        // The pool handle IS the process's connection state; failing to
        // connect here aborts startup, there is no degraded mode.
        let (user_repo, video_repo, pool): (
            Arc<dyn UserRepo>,
            Arc<dyn VideoRepo>,
            Option<Pool<MySql>>,
        ) = match settings.storage.backend.as_str() {
            "memory" => (
                Arc::new(MemoryUserRepo::new()),
                Arc::new(MemoryVideoRepo::new()),
                None,
            ),
            "mysql" => {
                let pool = Pool::<MySql>::connect(&settings.storage.mysql_dsn).await?;
                (
                    Arc::new(MySqlUserRepo::new(pool.clone())),
                    Arc::new(MySqlVideoRepo::new(pool.clone())),
                    Some(pool),
                )
            }
            other => return Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
        };

        let session_store: Arc<dyn SessionStore> = match settings.session.backend.as_str() {
            "memory" => Arc::new(MemorySessionStore::new()),
            "redis" => {
                let client = redis::Client::open(settings.session.redis_dsn.as_str())?;
                let manager = client.get_connection_manager().await?;
                Arc::new(RedisSessionStore::new(manager, "session"))
            }
            other => return Err(anyhow::anyhow!("Unknown session backend: {}", other)),
        };

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher);
        let session_ttl = Duration::from_secs(settings.session.ttl_secs);

        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            user_repo,
            credential_hasher,
            session_store.clone(),
            session_ttl,
        ));
        let session_authority: Arc<dyn SessionAuthority> =
            Arc::new(RealSessionAuthority::new(session_store));
        let catalog_service: Arc<dyn CatalogService> =
            Arc::new(RealCatalogService::new(video_repo));
        let media_service: Arc<dyn MediaAuthService> = Arc::new(HmacMediaSigner::new(
            settings.media.private_key.as_bytes(),
            Duration::from_secs(settings.media.token_ttl_secs),
        ));

        info!("server started");

        Ok(Self {
            auth_service,
            session_authority,
            catalog_service,
            media_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
