use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use tracing::debug;

use translated_core_api::TranslationError;
use translated_core_db::models::identifiable::Persistable;
use translated_core_db::models::translation::record::TranslationModel;
use translated_core_db::repository::update_batch::UpdateBatch;

use super::repo_impl::TranslationRepositoryImpl;

impl TranslationRepositoryImpl {
    pub(super) async fn update_batch_impl(
        &self,
        items: Vec<TranslationModel>,
    ) -> Result<Vec<TranslationModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

            for mut item in items {
                let mut query = self.update_query(&item)?;
                let result = query.build().execute(&mut **transaction).await?;
                if result.rows_affected() == 0 {
                    return Err(TranslationError::NotFound(format!(
                        "translation {} in {}",
                        item.id,
                        self.table.table()
                    ))
                    .into());
                }
                item.mark_persisted();
                updated_items.push(item);
            }
        }

        debug!(table = self.table.table(), count = updated_items.len(), "Updated translations");
        Ok(updated_items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, TranslationModel> for TranslationRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<TranslationModel>,
    ) -> Result<Vec<TranslationModel>, Box<dyn Error + Send + Sync>> {
        self.update_batch_impl(items).await
    }
}
