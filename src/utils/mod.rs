pub mod error;
pub mod logger;
pub mod markdown;
pub mod throttle;
pub mod validation;
