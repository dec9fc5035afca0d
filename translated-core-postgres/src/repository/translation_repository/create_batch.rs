use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use tracing::debug;

use translated_core_db::models::identifiable::Persistable;
use translated_core_db::models::translation::record::TranslationModel;
use translated_core_db::repository::create_batch::CreateBatch;

use super::repo_impl::TranslationRepositoryImpl;

impl TranslationRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &TranslationRepositoryImpl,
        items: Vec<TranslationModel>,
    ) -> Result<Vec<TranslationModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

            for mut item in items {
                let mut query = repo.insert_query(&item)?;
                query.build().execute(&mut **transaction).await?;
                item.mark_persisted();
                saved_items.push(item);
            }
        }

        debug!(table = repo.table.table(), count = saved_items.len(), "Inserted translations");
        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, TranslationModel> for TranslationRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<TranslationModel>,
    ) -> Result<Vec<TranslationModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
