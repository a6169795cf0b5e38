use uuid::Uuid;

use crate::{
    api::error,
    modules::video::{
        model::NewVideo,
        schema::{VideoCategoryRow, VideoEntity},
    },
};

#[async_trait::async_trait]
pub trait VideoRepository {
    fn get_pool(&self) -> &sqlx::Pool<sqlx::Postgres>;

    async fn create<'e, E>(&self, video: &NewVideo, tx: E) -> Result<VideoEntity, error::SystemError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>;

    async fn link_category<'e, E>(
        &self,
        video_id: &Uuid,
        category_id: &Uuid,
        tx: E,
    ) -> Result<(), error::SystemError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>;

    async fn find_by_id(&self, video_id: &Uuid) -> Result<Option<VideoEntity>, error::SystemError>;

    async fn find_all(&self) -> Result<Vec<VideoEntity>, error::SystemError>;

    async fn find_categories_for(
        &self,
        video_ids: &[Uuid],
    ) -> Result<Vec<VideoCategoryRow>, error::SystemError>;
}
