use crate::application_port::CatalogError;
use crate::domain_model::VideoRecord;
use crate::domain_port::VideoRepo;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryVideoRepo {
    videos: RwLock<Vec<VideoRecord>>,
}

impl MemoryVideoRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl VideoRepo for MemoryVideoRepo {
    async fn insert(&self, record: VideoRecord) -> Result<(), CatalogError> {
        let mut videos = self
            .videos
            .write()
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        videos.push(record);
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<VideoRecord>, CatalogError> {
        let videos = self
            .videos
            .read()
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        // Stable sort over the reversed insert order: timestamp ties come
        // back latest-inserted first.
        let mut out: Vec<VideoRecord> = videos.iter().rev().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}
