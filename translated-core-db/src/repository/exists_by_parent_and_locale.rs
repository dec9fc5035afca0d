use async_trait::async_trait;
use sqlx::Database;
use translated_core_api::Locale;
use uuid::Uuid;

/// Storage-level uniqueness probe for `(parent, locale)`
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait ExistsByParentAndLocale<DB: Database>: Send + Sync {
    /// Check whether a translation for `locale` is already stored for `parent_id`
    ///
    /// # Arguments
    /// * `parent_id` - The owning parent
    /// * `locale` - The locale to probe
    /// * `exclude_id` - A record id to ignore, typically the record being validated
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether another stored record holds the pair
    /// * `Err` - An error if the query could not be executed
    async fn exists_by_parent_and_locale(
        &self,
        parent_id: Uuid,
        locale: &Locale,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
