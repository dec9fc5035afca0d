use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for creating multiple entities in a batch
///
/// All creates are performed within the repository's shared transaction.
/// Returns the saved items.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl CreateBatch<Postgres, TranslationModel> for TranslationRepositoryImpl {
///     async fn create_batch(&self, items: Vec<TranslationModel>) -> Result<Vec<TranslationModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Insert multiple items
    ///
    /// # Arguments
    /// * `items` - A vector of entities to create
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The created entities, marked as persisted where applicable
    /// * `Err` - An error if the statements could not be executed
    async fn create_batch(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
