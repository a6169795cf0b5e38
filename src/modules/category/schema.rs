use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Category row from database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CategoryEntity {
    pub id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
}

impl From<CategoryEntity> for CategoryDto {
    fn from(entity: CategoryEntity) -> Self {
        Self { id: entity.id, name: entity.name }
    }
}
