pub mod dedupe;
pub mod error;
pub mod logger;
pub mod monitor;
pub mod validation;
