use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Repository trait for loading the translation collections of several parents at once
///
/// Each parent's records come back in the default association order, locale descending.
///
/// # Example
/// ```ignore
/// let collections = repo.load_by_parent_ids(&[product_id]).await?;
/// let (parent_id, translations) = &collections[0];
/// let product = TranslatableEntity::with_translations(model, config, translations.clone());
/// ```
#[async_trait]
pub trait LoadByParentIds<DB: Database, T: Identifiable>: Send + Sync {
    /// # Returns
    /// * `Ok(Vec<(Uuid, Vec<T>)>)` - One entry per requested parent id, in request order;
    ///   parents without translations get an empty vector
    /// * `Err` - An error if the query could not be executed
    async fn load_by_parent_ids(
        &self,
        parent_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, Vec<T>)>, Box<dyn std::error::Error + Send + Sync>>;
}
