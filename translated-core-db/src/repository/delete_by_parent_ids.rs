use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Remove every translation owned by the given parents.
#[async_trait]
pub trait DeleteByParentIds<DB: Database>: Send + Sync {
    /// # Returns
    /// * `Ok(usize)` - The number of translation records deleted
    /// * `Err` - An error if the statement could not be executed
    async fn delete_by_parent_ids(
        &self,
        parent_ids: &[Uuid],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
