//! HTTP request handlers

pub mod advice;
pub mod health;
pub mod pages;

pub use advice::{get_advice, list_queries, score_payload};
pub use health::health_check;
pub use pages::{advice_page, index};
