use crate::application_port::{CatalogError, CatalogService, CreateVideoInput, TransformationInput};
use crate::domain_model::{
    Identity, QUALITY_DEFAULT, QUALITY_MAX, QUALITY_MIN, Transformation, VideoId, VideoRecord,
};
use crate::domain_port::VideoRepo;
use chrono::Utc;
use std::sync::Arc;

pub struct RealCatalogService {
    video_repo: Arc<dyn VideoRepo>,
}

impl RealCatalogService {
    pub fn new(video_repo: Arc<dyn VideoRepo>) -> Self {
        Self { video_repo }
    }

    fn require_field(name: &'static str, value: &str) -> Result<(), CatalogError> {
        if value.trim().is_empty() {
            return Err(CatalogError::MissingField(name));
        }
        Ok(())
    }

    /// Only `quality` survives from caller input; width/height are pinned to
    /// the portrait target.
    fn resolve_transformation(
        input: Option<&TransformationInput>,
    ) -> Result<Transformation, CatalogError> {
        let quality = input.and_then(|t| t.quality).unwrap_or(QUALITY_DEFAULT);
        if !(QUALITY_MIN..=QUALITY_MAX).contains(&quality) {
            return Err(CatalogError::InvalidQuality);
        }
        Ok(Transformation::portrait(quality))
    }

    #[inline]
    fn new_video_id() -> VideoId {
        VideoId(uuid::Uuid::new_v4())
    }
}

#[async_trait::async_trait]
impl CatalogService for RealCatalogService {
    async fn list(&self) -> Result<Vec<VideoRecord>, CatalogError> {
        self.video_repo.list_recent().await
    }

    async fn create(
        &self,
        identity: &Identity,
        request: CreateVideoInput,
    ) -> Result<VideoRecord, CatalogError> {
        // Gate before anything else: anonymous callers never reach the store.
        if identity.is_anonymous() {
            return Err(CatalogError::Unauthorized);
        }

        Self::require_field("title", &request.title)?;
        Self::require_field("description", &request.description)?;
        Self::require_field("videoUrl", &request.video_url)?;
        Self::require_field("thumbnailUrl", &request.thumbnail_url)?;

        let transformation = Self::resolve_transformation(request.transformation.as_ref())?;

        let now = Utc::now();
        let record = VideoRecord {
            video_id: Self::new_video_id(),
            title: request.title,
            description: request.description,
            video_url: request.video_url,
            thumbnail_url: request.thumbnail_url,
            transformation,
            controls: request.controls.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        self.video_repo.insert(record.clone()).await?;

        Ok(record)
    }
}
