pub mod ambient;
pub mod identifiable;
pub mod locale_context;
pub mod translation;

// Re-exports
pub use identifiable::*;
pub use locale_context::*;
pub use translation::*;
