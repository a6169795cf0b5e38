use uuid::Uuid;

use crate::{
    api::error,
    modules::category::{repository::CategoryRepository, schema::CategoryEntity},
};

#[derive(Clone)]
pub struct CategoryPgRepository {
    pool: sqlx::PgPool,
}

impl CategoryPgRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CategoryRepository for CategoryPgRepository {
    fn get_pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }

    async fn find_all(&self) -> Result<Vec<CategoryEntity>, error::SystemError> {
        let categories = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT * FROM categories ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CategoryEntity>, error::SystemError> {
        let categories = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT * FROM categories WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find_by_name<'e, E>(
        &self,
        name: &str,
        tx: E,
    ) -> Result<Option<CategoryEntity>, error::SystemError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let category = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT * FROM categories WHERE lower(name) = lower($1)
            "#,
        )
        .bind(name)
        .fetch_optional(tx)
        .await?;

        Ok(category)
    }

    async fn create<'e, E>(&self, name: &str, tx: E) -> Result<CategoryEntity, error::SystemError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let category = sqlx::query_as::<_, CategoryEntity>(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .fetch_one(tx)
        .await?;

        Ok(category)
    }
}
