pub mod postgres_repositories;
pub mod repository;
pub mod scope;
pub mod table;
pub mod utils;

pub use postgres_repositories::{PostgresRepositories, TranslationRepositories};
pub use repository::translation_repository::TranslationRepositoryImpl;
pub use scope::TranslationScope;
pub use table::{ColumnType, TranslationColumn, TranslationTable};

#[cfg(test)]
pub mod test_helper;
