use postgres_unit_of_work::{Executor, UnitOfWorkSession};
use std::collections::HashMap;
use std::sync::Arc;

use translated_core_api::{ApiResult, TranslationError};

use super::TranslationRepositoryImpl;
use crate::table::TranslationTable;

/// Factory for creating translation repositories
///
/// Holds the table metadata of every translated parent type and builds repositories
/// bound to a given executor. This should be used as a singleton throughout the application.
pub struct TranslationRepoFactory {
    tables: HashMap<String, TranslationTable>,
}

impl TranslationRepoFactory {
    /// Tables are keyed by their parent table name; a later table replaces an earlier one.
    pub fn new(tables: Vec<TranslationTable>) -> Arc<Self> {
        let tables = tables
            .into_iter()
            .map(|table| (table.parent_table().to_string(), table))
            .collect();
        Arc::new(Self { tables })
    }

    pub fn table(&self, parent_table: &str) -> Option<&TranslationTable> {
        self.tables.get(parent_table)
    }

    pub fn parent_tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Build the repository of `parent_table` on an existing executor
    pub fn build_with_executor(
        &self,
        parent_table: &str,
        executor: &Executor,
    ) -> ApiResult<Arc<TranslationRepositoryImpl>> {
        let table = self.table(parent_table).ok_or_else(|| {
            TranslationError::Configuration(format!("no translation table registered for '{parent_table}'"))
        })?;
        Ok(Arc::new(TranslationRepositoryImpl::new(executor.clone(), table.clone())))
    }

    /// Build the repository of `parent_table` within a unit of work session
    pub fn build_translation_repo(
        &self,
        parent_table: &str,
        session: &impl UnitOfWorkSession,
    ) -> ApiResult<Arc<TranslationRepositoryImpl>> {
        let repo = self.build_with_executor(parent_table, session.executor())?;
        session.register_transaction_aware(repo.clone());
        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;

    #[test]
    fn test_tables_keyed_by_parent() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let factory = TranslationRepoFactory::new(vec![
            TranslationTable::for_parent("product")?.with_column("name", ColumnType::Text)?,
            TranslationTable::for_parent("category")?,
        ]);

        assert_eq!(factory.table("product").map(|t| t.table()), Some("product_translation"));
        assert!(factory.table("order").is_none());
        assert_eq!(factory.parent_tables().count(), 2);
        Ok(())
    }
}
