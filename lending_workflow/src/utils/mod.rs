pub mod constants;
pub mod contracts;
pub mod error;
pub mod logger;
pub mod math_helper;
