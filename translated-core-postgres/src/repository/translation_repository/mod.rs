pub mod repo_impl;
pub mod create_batch;
pub mod delete_batch;
pub mod delete_by_parent_ids;
pub mod exists_by_parent_and_locale;
pub mod load_batch;
pub mod load_by_parent_ids;
pub mod order_by_translation;
pub mod save_translations;
pub mod update_batch;

pub use repo_impl::TranslationRepositoryImpl;

#[cfg(test)]
pub mod test_utils;
