use async_trait::async_trait;
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Postgres, QueryBuilder, Row};
use std::collections::BTreeMap;
use std::error::Error;

use translated_core_api::{AttributeValue, TranslationError};
use translated_core_db::models::translation::record::TranslationModel;

use crate::table::{TranslationColumn, TranslationTable};
use crate::utils::{get_attribute, get_locale, push_attribute_bind};

/// Repository over one translation table, running on a shared transaction.
pub struct TranslationRepositoryImpl {
    pub executor: Executor,
    pub table: TranslationTable,
}

impl TranslationRepositoryImpl {
    pub fn new(executor: Executor, table: TranslationTable) -> Self {
        Self { executor, table }
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub(crate) fn model_from_row(&self, row: &PgRow) -> Result<TranslationModel, Box<dyn Error + Send + Sync>> {
        let mut values = BTreeMap::new();
        for column in self.table.columns() {
            values.insert(
                column.name().to_string(),
                get_attribute(row, column.name(), column.column_type())?,
            );
        }

        Ok(TranslationModel::from_storage(
            row.try_get("id")?,
            row.try_get(self.table.parent_key())?,
            get_locale(row, "locale")?,
            values,
        ))
    }

    /// Columns assigned on `item`, checked against the table.
    pub(crate) fn assigned_columns<'a>(
        &self,
        item: &'a TranslationModel,
    ) -> Result<Vec<(&TranslationColumn, Option<&'a AttributeValue>)>, TranslationError> {
        item.values
            .iter()
            .map(|(name, value)| Ok((self.table.require_column(name)?, value.as_ref())))
            .collect()
    }

    pub(crate) fn insert_query(&self, item: &TranslationModel) -> Result<QueryBuilder<'static, Postgres>, TranslationError> {
        let (parent_id, locale) = required_keys(item)?;
        let assigned = self.assigned_columns(item)?;

        let mut builder = QueryBuilder::new("INSERT INTO ");
        builder
            .push(self.table.table())
            .push(" (id, ")
            .push(self.table.parent_key())
            .push(", locale");
        for (column, _) in &assigned {
            builder.push(", ").push(column.name());
        }

        builder.push(") VALUES (");
        builder.push_bind(item.id);
        builder.push(", ");
        builder.push_bind(parent_id);
        builder.push(", ");
        builder.push_bind(locale);
        for (column, value) in &assigned {
            builder.push(", ");
            push_attribute_bind(&mut builder, column, *value)?;
        }
        builder.push(")");
        Ok(builder)
    }

    pub(crate) fn update_query(&self, item: &TranslationModel) -> Result<QueryBuilder<'static, Postgres>, TranslationError> {
        let (parent_id, locale) = required_keys(item)?;
        let assigned = self.assigned_columns(item)?;

        let mut builder = QueryBuilder::new("UPDATE ");
        builder.push(self.table.table()).push(" SET ").push(self.table.parent_key()).push(" = ");
        builder.push_bind(parent_id);
        builder.push(", locale = ");
        builder.push_bind(locale);
        for (column, value) in &assigned {
            builder.push(", ").push(column.name()).push(" = ");
            push_attribute_bind(&mut builder, column, *value)?;
        }
        builder.push(" WHERE id = ");
        builder.push_bind(item.id);
        Ok(builder)
    }
}

fn required_keys(item: &TranslationModel) -> Result<(uuid::Uuid, String), TranslationError> {
    let parent_id = item
        .parent_id
        .ok_or_else(|| TranslationError::InvalidArgument(format!("translation {} has no parent", item.id)))?;
    let locale = item
        .locale
        .as_ref()
        .ok_or_else(|| TranslationError::InvalidArgument(format!("translation {} has no locale", item.id)))?;
    Ok((parent_id, locale.to_string()))
}

#[async_trait]
impl TransactionAware for TranslationRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
