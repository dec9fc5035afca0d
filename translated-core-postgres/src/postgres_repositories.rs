use postgres_unit_of_work::{Executor, TransactionAware};
use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;
use tracing::debug;

use translated_core_api::TranslationError;

use crate::repository::{TranslationRepoFactory, TranslationRepositoryImpl};
use crate::table::TranslationTable;

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Create one translation repository per table, all sharing a single transaction
    pub async fn create_translation_repositories(
        &self,
        tables: Vec<TranslationTable>,
    ) -> Result<TranslationRepositories, Box<dyn Error + Send + Sync>> {
        let tx = self.pool.begin().await?;
        let executor = Executor::new(tx);

        let factory = TranslationRepoFactory::new(tables);
        let mut repositories = Vec::new();
        for parent_table in factory.parent_tables() {
            repositories.push(factory.build_with_executor(parent_table, &executor)?);
        }

        Ok(TranslationRepositories {
            executor,
            repositories,
        })
    }
}

/// Translation repositories bound to one transaction.
///
/// Dropping without [`commit`](Self::commit) rolls the transaction back.
pub struct TranslationRepositories {
    executor: Executor,
    repositories: Vec<Arc<TranslationRepositoryImpl>>,
}

impl TranslationRepositories {
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Repository of the translations of `parent_table`
    pub fn get(&self, parent_table: &str) -> Option<&Arc<TranslationRepositoryImpl>> {
        self.repositories
            .iter()
            .find(|repo| repo.table().parent_table() == parent_table)
    }

    pub async fn commit(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self.executor.tx.lock().await.take();
        let transaction = tx.ok_or_else(|| TranslationError::Database("Transaction has been consumed".to_string()))?;
        transaction.commit().await?;

        for repo in &self.repositories {
            repo.on_commit().await?;
        }
        debug!(repositories = self.repositories.len(), "Committed translation transaction");
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self.executor.tx.lock().await.take();
        let transaction = tx.ok_or_else(|| TranslationError::Database("Transaction has been consumed".to_string()))?;
        transaction.rollback().await?;

        for repo in &self.repositories {
            repo.on_rollback().await?;
        }
        Ok(())
    }
}
