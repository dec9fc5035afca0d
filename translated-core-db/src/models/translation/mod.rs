pub mod config;
pub mod nested;
pub mod ordering;
pub mod record;
pub mod translatable;
pub mod validation;

pub use config::*;
pub use nested::*;
pub use ordering::*;
pub use record::*;
pub use translatable::*;
pub use validation::*;
