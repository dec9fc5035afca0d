use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Row};
use std::error::Error;
use uuid::Uuid;

use translated_core_api::AttributeValue;
use translated_core_db::models::translation::ordering::TranslationOrder;
use translated_core_db::repository::order_by_translation::OrderByTranslation;

use super::repo_impl::TranslationRepositoryImpl;
use crate::scope::TranslationScope;
use crate::table::TranslationTable;
use crate::utils::get_attribute;

const SORT_VALUE: &str = "sort_value";

/// Parent ids with the value they are sorted by, as a single-order scope.
pub(crate) fn order_query(
    table: &TranslationTable,
    order: &TranslationOrder,
) -> Result<QueryBuilder<'static, Postgres>, Box<dyn Error + Send + Sync>> {
    let scope = TranslationScope::new(table).order_by_translation(order)?;
    let sort_column = scope.primary_sort_column().ok_or("order scope has no sort column")?;
    let select = format!("{}.id AS parent_id, {sort_column} AS {SORT_VALUE}", table.parent_table());
    Ok(scope.build_with_select(&select))
}

impl TranslationRepositoryImpl {
    /// An empty scope over this repository's parent table.
    pub fn scope(&self) -> TranslationScope<'_> {
        TranslationScope::new(&self.table)
    }

    /// Run `scope` on the shared transaction and return the parent ids in order.
    pub async fn fetch_parent_ids(&self, scope: TranslationScope<'_>) -> Result<Vec<Uuid>, Box<dyn Error + Send + Sync>> {
        let select = format!("{}.id", scope.table().parent_table());
        let mut query = scope.build_with_select(&select);

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            query.build().fetch_all(&mut **transaction).await?
        };

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            ids.push(row.try_get::<Uuid, _>(0)?);
        }
        Ok(ids)
    }

    pub(super) async fn order_by_translation_impl(
        &self,
        order: &TranslationOrder,
    ) -> Result<Vec<(Uuid, Option<AttributeValue>)>, Box<dyn Error + Send + Sync>> {
        let column_type = self.table.require_column(order.attribute())?.column_type();
        let mut query = order_query(&self.table, order)?;

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            query.build().fetch_all(&mut **transaction).await?
        };

        let mut ordered = Vec::with_capacity(rows.len());
        for row in rows {
            let parent_id: Uuid = row.try_get("parent_id")?;
            ordered.push((parent_id, get_attribute(&row, SORT_VALUE, column_type)?));
        }
        Ok(ordered)
    }
}

#[async_trait]
impl OrderByTranslation<Postgres> for TranslationRepositoryImpl {
    async fn order_by_translation(
        &self,
        order: &TranslationOrder,
    ) -> Result<Vec<(Uuid, Option<AttributeValue>)>, Box<dyn Error + Send + Sync>> {
        self.order_by_translation_impl(order).await
    }
}
