use async_trait::async_trait;
use sqlx::{Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use translated_core_api::Locale;
use translated_core_db::repository::exists_by_parent_and_locale::ExistsByParentAndLocale;

use super::repo_impl::TranslationRepositoryImpl;

impl TranslationRepositoryImpl {
    /// Probe ignoring every id in `exclude_ids`.
    pub(super) async fn exists_by_parent_and_locale_impl(
        &self,
        parent_id: Uuid,
        locale: &Locale,
        exclude_ids: &[Uuid],
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {table} WHERE {key} = $1 AND locale = $2 AND NOT (id = ANY($3)))",
            table = self.table.table(),
            key = self.table.parent_key(),
        );
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(&query)
                .bind(parent_id)
                .bind(locale.as_str())
                .bind(exclude_ids)
                .fetch_one(&mut **transaction)
                .await?
        };
        Ok(row.try_get(0)?)
    }
}

#[async_trait]
impl ExistsByParentAndLocale<Postgres> for TranslationRepositoryImpl {
    async fn exists_by_parent_and_locale(
        &self,
        parent_id: Uuid,
        locale: &Locale,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        self.exists_by_parent_and_locale_impl(parent_id, locale, exclude_id.as_slice())
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use serial_test::serial;
    use translated_core_db::repository::create_batch::CreateBatch;
    use translated_core_db::repository::exists_by_parent_and_locale::ExistsByParentAndLocale;
    use super::super::test_utils::test_utils::{create_test_product, create_test_translation, locale};

    #[tokio::test]
    #[serial]
    async fn test_exists_by_parent_and_locale() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = ctx.product_translation_repository();
        let product_id = create_test_product(&ctx, None).await?;
        let other_product_id = create_test_product(&ctx, None).await?;

        let saved = repo
            .create_batch(vec![create_test_translation(product_id, "lv", "lv-name")])
            .await?;

        assert!(repo.exists_by_parent_and_locale(product_id, &locale("lv"), None).await?);
        assert!(!repo.exists_by_parent_and_locale(product_id, &locale("en"), None).await?);
        assert!(!repo.exists_by_parent_and_locale(other_product_id, &locale("lv"), None).await?);
        assert!(
            !repo
                .exists_by_parent_and_locale(product_id, &locale("lv"), Some(saved[0].id))
                .await?
        );

        Ok(())
    }
}
