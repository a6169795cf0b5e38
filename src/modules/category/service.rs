use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::category::{repository::CategoryRepository, schema::CategoryEntity},
};

#[derive(Clone)]
pub struct CategoryService<R>
where
    R: CategoryRepository + Send + Sync,
{
    category_repo: Arc<R>,
}

impl<R> CategoryService<R>
where
    R: CategoryRepository + Send + Sync,
{
    pub fn with_dependencies(category_repo: Arc<R>) -> Self {
        Self { category_repo }
    }

    pub async fn get_all(&self) -> Result<Vec<CategoryEntity>, error::SystemError> {
        self.category_repo.find_all().await
    }

    /// Creates a category with a trimmed name; duplicate names (case
    /// insensitive) are a conflict.
    pub async fn create(&self, name: &str) -> Result<CategoryEntity, error::SystemError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(error::SystemError::bad_request("Category name must not be empty"));
        }

        let mut tx = self.category_repo.get_pool().begin().await?;
        let category = self.category_repo.create(name, tx.as_mut()).await?;
        tx.commit().await?;

        Ok(category)
    }

    /// Resolves existing categories by id and creates any new names that are
    /// not present yet, reusing rows that match case-insensitively.
    pub async fn resolve_or_create(
        &self,
        category_ids: &[Uuid],
        new_names: &[String],
    ) -> Result<Vec<CategoryEntity>, error::SystemError> {
        let mut categories = Vec::new();

        if !category_ids.is_empty() {
            categories = self.category_repo.find_by_ids(category_ids).await?;
        }

        let mut seen: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();

        for name in new_names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let mut tx = self.category_repo.get_pool().begin().await?;
            let category = match self.category_repo.find_by_name(name, tx.as_mut()).await? {
                Some(existing) => existing,
                None => self.category_repo.create(name, tx.as_mut()).await?,
            };
            tx.commit().await?;

            if seen.insert(category.id) {
                categories.push(category);
            }
        }

        Ok(categories)
    }
}
