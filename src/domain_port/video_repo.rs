use crate::application_port::CatalogError;
use crate::domain_model::VideoRecord;

#[async_trait::async_trait]
pub trait VideoRepo: Send + Sync {
    /// Persist a fully validated, fully defaulted record verbatim.
    async fn insert(&self, record: VideoRecord) -> Result<(), CatalogError>;

    /// All records ordered by `created_at` descending.
    async fn list_recent(&self) -> Result<Vec<VideoRecord>, CatalogError>;
}
