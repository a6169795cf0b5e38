use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::modules::category::schema::CategoryDto;

/// Video row from database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct VideoEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub file_path: String,
    /// Empty when no thumbnail could be produced for this video.
    pub thumbnail_path: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Join row linking a video to one of its categories.
#[derive(Debug, Clone, FromRow)]
pub struct VideoCategoryRow {
    pub video_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Serialize)]
pub struct VideoUploadResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub thumbnail_url: String,
}
