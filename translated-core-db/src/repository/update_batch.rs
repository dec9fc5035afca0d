use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for updating multiple entities in a batch
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait UpdateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Update multiple items in the shared transaction
    ///
    /// # Arguments
    /// * `items` - A vector of entities to update, matched by id
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The updated entities
    /// * `Err` - An error if an item does not exist or the statements could not be executed
    async fn update_batch(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
