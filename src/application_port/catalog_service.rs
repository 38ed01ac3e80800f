use crate::domain_model::{Identity, VideoRecord};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("authentication required")]
    Unauthorized,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("transformation quality must be between 1 and 100")]
    InvalidQuality,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone, Default)]
pub struct TransformationInput {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct CreateVideoInput {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub transformation: Option<TransformationInput>,
    pub controls: Option<bool>,
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// All published videos, newest first. An empty catalog is an empty Vec.
    async fn list(&self) -> Result<Vec<VideoRecord>, CatalogError>;

    /// Gated create: `identity` must not be anonymous. Repeated calls with
    /// the same payload create distinct records.
    async fn create(
        &self,
        identity: &Identity,
        request: CreateVideoInput,
    ) -> Result<VideoRecord, CatalogError>;
}
