use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use tracing::debug;
use uuid::Uuid;

use translated_core_db::repository::delete_by_parent_ids::DeleteByParentIds;

use super::repo_impl::TranslationRepositoryImpl;

impl TranslationRepositoryImpl {
    pub(super) async fn delete_by_parent_ids_impl(
        &self,
        parent_ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if parent_ids.is_empty() {
            return Ok(0);
        }

        let query = format!(
            "DELETE FROM {} WHERE {} = ANY($1)",
            self.table.table(),
            self.table.parent_key()
        );
        let rows_affected = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let result = sqlx::query(&query).bind(parent_ids).execute(&mut **transaction).await?;
            result.rows_affected() as usize
        };

        debug!(table = self.table.table(), rows_affected, "Deleted translations of parents");
        Ok(rows_affected)
    }
}

#[async_trait]
impl DeleteByParentIds<Postgres> for TranslationRepositoryImpl {
    async fn delete_by_parent_ids(&self, parent_ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        self.delete_by_parent_ids_impl(parent_ids).await
    }
}
