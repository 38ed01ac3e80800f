use crate::application_port::{
    AuthError, AuthService, CredentialHasher, LoginInput, LoginResult, RegisterInput,
};
use crate::domain_model::UserId;
use crate::domain_port::{SessionStore, UserRepo};
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use nanoid::nanoid;
use std::sync::Arc;
use std::time::Duration;

const SESSION_ID_LEN: usize = 32;

pub struct Argon2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        // Hashing is deliberately expensive; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AuthError::InternalError(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::InternalError(e.to_string()))?
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash)
                .map_err(|e| AuthError::InternalError(format!("invalid PHC hash: {}", e)))?;

            match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                Ok(_) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(AuthError::InternalError(format!("verify error: {}", e))),
            }
        })
        .await
        .map_err(|e| AuthError::InternalError(e.to_string()))?
    }
}

pub struct RealAuthService {
    user_repo: Arc<dyn UserRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    session_store: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl RealAuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        session_store: Arc<dyn SessionStore>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_repo,
            credential_hasher,
            session_store,
            session_ttl,
        }
    }

    fn require_credentials(email: &str, password: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(())
    }

    #[inline]
    fn new_user_id() -> UserId {
        UserId(uuid::Uuid::new_v4())
    }

    #[inline]
    fn new_session_id() -> String {
        nanoid!(SESSION_ID_LEN)
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn register(&self, request: RegisterInput) -> Result<UserId, AuthError> {
        let RegisterInput { email, password } = request;

        Self::require_credentials(&email, &password)?;

        // Friendly-path check; the store's unique key closes the race.
        if self.user_repo.get_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.credential_hasher.hash_password(&password).await?;
        let user_id = Self::new_user_id();
        self.user_repo.create(user_id, &email, &password_hash).await?;

        Ok(user_id)
    }

    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError> {
        let LoginInput { email, password } = request;

        Self::require_credentials(&email, &password)?;

        // Unknown email and wrong password take the same exit.
        let rec = self
            .user_repo
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let ok = self
            .credential_hasher
            .verify_password(&password, &rec.password_hash)
            .await?;
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }

        let session_id = Self::new_session_id();
        let expires_at = Utc::now() + self.session_ttl;
        self.session_store
            .save(&session_id, &rec.email, self.session_ttl.as_secs())
            .await?;

        Ok(LoginResult {
            identity: rec.email,
            session_id,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra_memory::{MemorySessionStore, MemoryUserRepo};

    fn service() -> (RealAuthService, Arc<MemoryUserRepo>) {
        let user_repo = Arc::new(MemoryUserRepo::new());
        let service = RealAuthService::new(
            user_repo.clone(),
            Arc::new(Argon2PasswordHasher),
            Arc::new(MemorySessionStore::new()),
            Duration::from_secs(3600),
        );
        (service, user_repo)
    }

    fn register_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let (service, _) = service();

        service
            .register(register_input("a@x.com", "pw1"))
            .await
            .unwrap();

        let result = service.login(login_input("a@x.com", "pw1")).await.unwrap();
        assert_eq!(result.identity, "a@x.com");
        assert!(!result.session_id.is_empty());
        assert!(result.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn register_rejects_missing_fields() {
        let (service, _) = service();

        let err = service.register(register_input("", "pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));

        let err = service
            .register(register_input("a@x.com", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
    }

    #[tokio::test]
    async fn login_rejects_missing_fields() {
        let (service, _) = service();

        let err = service.login(login_input("", "pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_and_original_survives() {
        let (service, user_repo) = service();

        service
            .register(register_input("a@x.com", "pw1"))
            .await
            .unwrap();
        let original = user_repo.get_by_email("a@x.com").await.unwrap().unwrap();

        let err = service
            .register(register_input("a@x.com", "pw2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        // The stored credential is untouched and the first password still works.
        let kept = user_repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(kept.password_hash, original.password_hash);
        service.login(login_input("a@x.com", "pw1")).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_fail_alike() {
        let (service, _) = service();

        service
            .register(register_input("a@x.com", "pw1"))
            .await
            .unwrap();

        let wrong_password = service
            .login(login_input("a@x.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(login_input("nobody@x.com", "pw1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_raw_password() {
        let (service, user_repo) = service();

        service
            .register(register_input("a@x.com", "pw1"))
            .await
            .unwrap();

        let rec = user_repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_ne!(rec.password_hash, "pw1");
        assert!(rec.password_hash.starts_with("$argon2"));

        // Login hands back identity and session only, never hash material.
        let result = service.login(login_input("a@x.com", "pw1")).await.unwrap();
        assert_ne!(result.session_id, rec.password_hash);
    }
}
