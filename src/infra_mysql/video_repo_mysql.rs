use crate::application_port::CatalogError;
use crate::domain_model::{Transformation, VideoId, VideoRecord};
use crate::domain_port::VideoRepo;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

pub struct MySqlVideoRepo {
    pool: MySqlPool,
}

impl MySqlVideoRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlVideoRepo { pool }
    }

    fn row_to_record(row: MySqlRow) -> Result<VideoRecord, CatalogError> {
        let video_id_bytes: Vec<u8> = row
            .try_get("video_id")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let video_id = VideoId(
            Uuid::from_slice(&video_id_bytes).map_err(|e| CatalogError::Store(e.to_string()))?,
        );

        let title: String = row
            .try_get("title")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let description: String = row
            .try_get("description")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let video_url: String = row
            .try_get("video_url")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let thumbnail_url: String = row
            .try_get("thumbnail_url")
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        let width: u32 = row
            .try_get("transform_width")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let height: u32 = row
            .try_get("transform_height")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let quality: u8 = row
            .try_get("quality")
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        let controls: bool = row
            .try_get("controls")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(VideoRecord {
            video_id,
            title,
            description,
            video_url,
            thumbnail_url,
            transformation: Transformation {
                width,
                height,
                quality,
            },
            controls,
            created_at,
            updated_at,
        })
    }
}

#[async_trait::async_trait]
impl VideoRepo for MySqlVideoRepo {
    async fn insert(&self, record: VideoRecord) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
INSERT INTO video
    (video_id, title, description, video_url, thumbnail_url,
     transform_width, transform_height, quality, controls, created_at, updated_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(record.video_id.0.as_bytes() as &[u8])
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.video_url)
        .bind(&record.thumbnail_url)
        .bind(record.transformation.width)
        .bind(record.transformation.height)
        .bind(record.transformation.quality)
        .bind(record.controls)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<VideoRecord>, CatalogError> {
        let rows = sqlx::query(
            r#"
SELECT video_id, title, description, video_url, thumbnail_url,
       transform_width, transform_height, quality, controls, created_at, updated_at
FROM video
ORDER BY created_at DESC
"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_record).collect()
    }
}
