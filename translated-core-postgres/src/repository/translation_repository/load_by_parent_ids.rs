use async_trait::async_trait;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use translated_core_db::models::translation::record::{TranslationModel, TranslationRecordPolicy};
use translated_core_db::repository::load_by_parent_ids::LoadByParentIds;

use super::repo_impl::TranslationRepositoryImpl;

impl TranslationRepositoryImpl {
    pub(super) async fn load_by_parent_ids_impl(
        &self,
        parent_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, Vec<TranslationModel>)>, Box<dyn Error + Send + Sync>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        // Byte-wise collation keeps the order identical to the in-memory locale sort.
        let query = format!(
            r#"SELECT * FROM {table} WHERE {key} = ANY($1) ORDER BY {key}, locale COLLATE "C" DESC"#,
            table = self.table.table(),
            key = self.table.parent_key(),
        );
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(&query).bind(parent_ids).fetch_all(&mut **transaction).await?
        };

        let mut by_parent: HashMap<Uuid, Vec<TranslationModel>> = HashMap::new();
        for row in rows {
            let item = self.model_from_row(&row)?;
            if let Some(parent_id) = item.parent_id() {
                by_parent.entry(parent_id).or_default().push(item);
            }
        }

        Ok(parent_ids
            .iter()
            .map(|id| (*id, by_parent.remove(id).unwrap_or_default()))
            .collect())
    }
}

#[async_trait]
impl LoadByParentIds<Postgres, TranslationModel> for TranslationRepositoryImpl {
    async fn load_by_parent_ids(
        &self,
        parent_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, Vec<TranslationModel>)>, Box<dyn Error + Send + Sync>> {
        self.load_by_parent_ids_impl(parent_ids).await
    }
}
