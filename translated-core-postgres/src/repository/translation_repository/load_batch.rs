use async_trait::async_trait;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use translated_core_db::models::translation::record::TranslationModel;
use translated_core_db::repository::load_batch::LoadBatch;

use super::repo_impl::TranslationRepositoryImpl;

impl TranslationRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &TranslationRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<TranslationModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("SELECT * FROM {} WHERE id = ANY($1)", repo.table.table());
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(&query).bind(ids).fetch_all(&mut **transaction).await?
        };

        let mut item_map = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = repo.model_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, TranslationModel> for TranslationRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<TranslationModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
