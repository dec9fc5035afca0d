use async_trait::async_trait;
use sqlx::Database;

use crate::models::locale_context::LocaleContext;
use crate::models::translation::record::TranslationRecordPolicy;
use crate::models::translation::translatable::{TranslatableEntity, TranslatableModel};

/// Persist a parent's translation collection
///
/// The save is refused with `TranslationError::Validation` when the entity is invalid,
/// or when a new record collides with a stored `(parent, locale)` pair. Otherwise, in
/// order: removed records are deleted, new records inserted, persisted records updated.
/// Saved records are marked persisted and the removal list is cleared.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `P` - The parent model
/// * `T` - The translation record type
///
/// # Example
/// ```ignore
/// product.assign_nested_attributes(sets, &ctx)?;
/// repo.save_translations(&mut product, &ctx).await?;
/// ```
#[async_trait]
pub trait SaveTranslations<DB, P, T>: Send + Sync
where
    DB: Database,
    P: TranslatableModel + Send + Sync,
    T: TranslationRecordPolicy + Send + Sync,
{
    /// # Returns
    /// * `Ok(usize)` - The number of records written (inserted, updated or deleted)
    /// * `Err` - Validation refusal or storage failure
    async fn save_translations(
        &self,
        entity: &mut TranslatableEntity<P, T>,
        ctx: &LocaleContext,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
