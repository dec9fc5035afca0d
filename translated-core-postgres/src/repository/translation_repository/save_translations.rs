use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use translated_core_api::{Locale, TranslationError, ValidationErrors};
use translated_core_db::models::identifiable::Persistable;
use translated_core_db::models::locale_context::LocaleContext;
use translated_core_db::models::translation::record::{TranslationModel, TranslationRecordPolicy};
use translated_core_db::models::translation::translatable::{TranslatableEntity, TranslatableModel};
use translated_core_db::models::translation::validation::{INVALID_MESSAGE, TRANSLATIONS_FIELD};
use translated_core_db::repository::save_translations::SaveTranslations;

use super::repo_impl::TranslationRepositoryImpl;

impl TranslationRepositoryImpl {
    /// Locales of new records already stored for the parent by rows outside the loaded
    /// collection. Loaded rows are rewritten by the save, so they never conflict.
    async fn storage_conflicts<P: TranslatableModel>(
        &self,
        entity: &TranslatableEntity<P, TranslationModel>,
    ) -> Result<Vec<Locale>, Box<dyn Error + Send + Sync>> {
        let exclude: Vec<Uuid> = entity
            .removed_translation_ids()
            .iter()
            .copied()
            .chain(entity.translations().iter().map(|t| t.id))
            .collect();
        let probes: Vec<(Uuid, Locale)> = entity
            .translations()
            .iter()
            .filter(|t| t.is_new_record())
            .filter_map(|t| Some((t.parent_id()?, t.locale()?.clone())))
            .collect();

        let mut conflicts = Vec::new();
        for (parent_id, locale) in probes {
            if self.exists_by_parent_and_locale_impl(parent_id, &locale, &exclude).await? {
                conflicts.push(locale);
            }
        }
        Ok(conflicts)
    }

    pub(super) async fn save_translations_impl<P>(
        &self,
        entity: &mut TranslatableEntity<P, TranslationModel>,
        ctx: &LocaleContext,
    ) -> Result<usize, Box<dyn Error + Send + Sync>>
    where
        P: TranslatableModel + Send + Sync,
    {
        self.table.covers(entity.config())?;

        let mut errors: ValidationErrors = entity.validate(ctx);
        let conflicts = self.storage_conflicts(entity).await?;
        if !conflicts.is_empty() && !errors.contains(TRANSLATIONS_FIELD) {
            errors.add(TRANSLATIONS_FIELD, INVALID_MESSAGE);
        }
        if !errors.is_empty() {
            warn!(parent_id = %entity.id(), errors = %errors, ?conflicts, "Refusing to save invalid translations");
            return Err(TranslationError::Validation(errors).into());
        }

        let removed = entity.removed_translation_ids().to_vec();
        let (new_records, persisted): (Vec<TranslationModel>, Vec<TranslationModel>) = entity
            .translations()
            .iter()
            .cloned()
            .partition(|t| t.is_new_record());

        // Updates run before inserts so a locale given up by a loaded record is free
        // for a new one.
        let deleted = Self::delete_batch_impl(self, &removed).await?;
        let updated = self.update_batch_impl(persisted).await?;
        let created = Self::create_batch_impl(self, new_records).await?;

        for record in entity.translations_mut() {
            record.mark_persisted();
        }
        entity.clear_removed_translation_ids();

        let written = deleted + created.len() + updated.len();
        debug!(parent_id = %entity.id(), deleted, created = created.len(), updated = updated.len(), "Saved translations");
        Ok(written)
    }
}

#[async_trait]
impl<P> SaveTranslations<Postgres, P, TranslationModel> for TranslationRepositoryImpl
where
    P: TranslatableModel + Send + Sync,
{
    async fn save_translations(
        &self,
        entity: &mut TranslatableEntity<P, TranslationModel>,
        ctx: &LocaleContext,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        self.save_translations_impl(entity, ctx).await
    }
}
