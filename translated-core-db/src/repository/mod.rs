pub mod create_batch;
pub mod delete_batch;
pub mod delete_by_parent_ids;
pub mod exists_by_parent_and_locale;
pub mod load_batch;
pub mod load_by_parent_ids;
pub mod order_by_translation;
pub mod save_translations;
pub mod update_batch;

// Re-exports
pub use create_batch::*;
pub use delete_batch::*;
pub use delete_by_parent_ids::*;
pub use exists_by_parent_and_locale::*;
pub use load_batch::*;
pub use load_by_parent_ids::*;
pub use order_by_translation::*;
pub use save_translations::*;
pub use update_batch::*;
