pub mod factory;
pub mod translation_repository;

pub use factory::TranslationRepoFactory;
pub use translation_repository::TranslationRepositoryImpl;
