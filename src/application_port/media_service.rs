use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Signed hand-off the client presents to the media store when uploading.
/// The core never touches the media bytes themselves.
#[derive(Debug, Clone, Serialize)]
pub struct UploadCredentials {
    pub token: String,
    pub expire: i64,
    pub signature: String,
}

#[async_trait::async_trait]
pub trait MediaAuthService: Send + Sync {
    async fn upload_credentials(&self) -> Result<UploadCredentials, MediaError>;
}
