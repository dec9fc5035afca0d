use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for deleting multiple entities in a batch
///
/// Returns the number of items successfully deleted. Unknown ids are ignored.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait DeleteBatch<DB: Database>: Send + Sync {
    /// Delete multiple items by their IDs
    ///
    /// # Arguments
    /// * `ids` - A slice of UUIDs of the entities to delete
    ///
    /// # Returns
    /// * `Ok(usize)` - The number of items deleted
    /// * `Err` - An error if the statement could not be executed
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
