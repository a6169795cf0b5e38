use uuid::Uuid;

use crate::{
    api::error,
    modules::video::{
        model::NewVideo,
        repository::VideoRepository,
        schema::{VideoCategoryRow, VideoEntity},
    },
};

#[derive(Clone)]
pub struct VideoPgRepository {
    pool: sqlx::PgPool,
}

impl VideoPgRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl VideoRepository for VideoPgRepository {
    fn get_pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }

    async fn create<'e, E>(&self, video: &NewVideo, tx: E) -> Result<VideoEntity, error::SystemError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let entity = sqlx::query_as::<_, VideoEntity>(
            r#"
            INSERT INTO videos (id, title, description, file_path, thumbnail_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.file_path)
        .bind(&video.thumbnail_path)
        .fetch_one(tx)
        .await?;

        Ok(entity)
    }

    async fn link_category<'e, E>(
        &self,
        video_id: &Uuid,
        category_id: &Uuid,
        tx: E,
    ) -> Result<(), error::SystemError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO video_categories (video_id, category_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(video_id)
        .bind(category_id)
        .execute(tx)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, video_id: &Uuid) -> Result<Option<VideoEntity>, error::SystemError> {
        let video = sqlx::query_as::<_, VideoEntity>(
            r#"
            SELECT * FROM videos WHERE id = $1
            "#,
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn find_all(&self) -> Result<Vec<VideoEntity>, error::SystemError> {
        let videos = sqlx::query_as::<_, VideoEntity>(
            r#"
            SELECT * FROM videos ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn find_categories_for(
        &self,
        video_ids: &[Uuid],
    ) -> Result<Vec<VideoCategoryRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, VideoCategoryRow>(
            r#"
            SELECT vc.video_id, c.id AS category_id, c.name
            FROM video_categories vc
            JOIN categories c ON c.id = vc.category_id
            WHERE vc.video_id = ANY($1)
            ORDER BY c.name
            "#,
        )
        .bind(video_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
