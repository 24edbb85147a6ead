//! Business logic services for Spores & Outdoors

pub mod advisory;
pub mod query_log;

pub use advisory::AdvisoryService;
pub use query_log::{QueryLogStore, QueryRecord};
