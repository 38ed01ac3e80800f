use crate::application_port::{MediaAuthService, MediaError, UploadCredentials};
use chrono::Utc;
use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use std::time::Duration;

/// Issues the `{token, expire, signature}` triple the client forwards to the
/// media store for a direct upload. The signature covers `token + expire` so
/// neither can be swapped out after issuance.
pub struct HmacMediaSigner {
    private_key: Vec<u8>,
    token_ttl: Duration,
}

impl HmacMediaSigner {
    pub fn new(private_key: impl Into<Vec<u8>>, token_ttl: Duration) -> Self {
        Self {
            private_key: private_key.into(),
            token_ttl,
        }
    }

    fn sign(&self, token: &str, expire: i64) -> Result<String, MediaError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.private_key)
            .map_err(|e| MediaError::InternalError(e.to_string()))?;
        mac.update(token.as_bytes());
        mac.update(expire.to_string().as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

#[async_trait::async_trait]
impl MediaAuthService for HmacMediaSigner {
    async fn upload_credentials(&self) -> Result<UploadCredentials, MediaError> {
        let token = uuid::Uuid::new_v4().to_string();
        let expire = (Utc::now() + self.token_ttl).timestamp();
        let signature = self.sign(&token, expire)?;

        Ok(UploadCredentials {
            token,
            expire,
            signature,
        })
    }
}
