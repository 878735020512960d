pub mod collection;
pub mod error;
pub mod logger;
pub mod validation;
