use async_trait::async_trait;
use sqlx::Database;
use translated_core_api::AttributeValue;
use uuid::Uuid;

use crate::models::translation::ordering::TranslationOrder;

/// Repository trait for the `order_by_translation` scope
///
/// Every parent appears exactly once, ordered ascending by the value stored in its
/// translation for the order's locale. Parents lacking that translation (or holding a
/// null value) come first.
///
/// # Example
/// ```ignore
/// let order = TranslationOrder::for_attribute("name", &ctx)?;
/// let ordered = repo.order_by_translation(&order).await?;
/// for (product_id, name) in ordered {
///     // ...
/// }
/// ```
#[async_trait]
pub trait OrderByTranslation<DB: Database>: Send + Sync {
    /// # Arguments
    /// * `order` - Attribute, locale and join alias of this invocation
    ///
    /// # Returns
    /// * `Ok(Vec<(Uuid, Option<AttributeValue>)>)` - Parent ids with the value they were sorted by
    /// * `Err` - An error if the attribute is not a column or the query could not be executed
    async fn order_by_translation(
        &self,
        order: &TranslationOrder,
    ) -> Result<Vec<(Uuid, Option<AttributeValue>)>, Box<dyn std::error::Error + Send + Sync>>;
}
