pub mod cancel;
pub mod error;
pub mod logger;
pub mod output;
pub mod validation;
