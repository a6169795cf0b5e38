use uuid::Uuid;

use crate::{api::error, modules::category::schema::CategoryEntity};

#[async_trait::async_trait]
pub trait CategoryRepository {
    fn get_pool(&self) -> &sqlx::Pool<sqlx::Postgres>;

    async fn find_all(&self) -> Result<Vec<CategoryEntity>, error::SystemError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CategoryEntity>, error::SystemError>;

    async fn find_by_name<'e, E>(
        &self,
        name: &str,
        tx: E,
    ) -> Result<Option<CategoryEntity>, error::SystemError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>;

    async fn create<'e, E>(&self, name: &str, tx: E) -> Result<CategoryEntity, error::SystemError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>;
}
