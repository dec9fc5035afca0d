pub mod attribute_value;
pub mod locale;
pub mod validation_errors;

pub use attribute_value::*;
pub use locale::*;
pub use validation_errors::*;
