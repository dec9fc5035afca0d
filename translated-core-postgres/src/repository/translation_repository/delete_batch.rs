use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use tracing::debug;
use uuid::Uuid;

use translated_core_db::repository::delete_batch::DeleteBatch;

use super::repo_impl::TranslationRepositoryImpl;

impl TranslationRepositoryImpl {
    pub(super) async fn delete_batch_impl(
        repo: &TranslationRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let delete_query = format!("DELETE FROM {} WHERE id = ANY($1)", repo.table.table());
        let rows_affected = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let result = sqlx::query(&delete_query).bind(ids).execute(&mut **transaction).await?;
            result.rows_affected() as usize
        };

        debug!(table = repo.table.table(), rows_affected, "Deleted translations");
        Ok(rows_affected)
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for TranslationRepositoryImpl {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use serial_test::serial;
    use translated_core_db::repository::create_batch::CreateBatch;
    use translated_core_db::repository::delete_batch::DeleteBatch;
    use uuid::Uuid;
    use super::super::test_utils::test_utils::{create_test_product, create_test_translation};

    #[tokio::test]
    #[serial]
    async fn test_delete_batch_with_non_existing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = ctx.product_translation_repository();
        let product_id = create_test_product(&ctx, None).await?;

        let saved = repo
            .create_batch(vec![
                create_test_translation(product_id, "en", "en-name"),
                create_test_translation(product_id, "lv", "lv-name"),
            ])
            .await?;

        let mut ids: Vec<Uuid> = saved.iter().map(|t| t.id).collect();
        ids.push(Uuid::new_v4());

        assert_eq!(repo.delete_batch(&ids).await?, 2);
        assert_eq!(repo.delete_batch(&ids).await?, 0);

        Ok(())
    }
}
