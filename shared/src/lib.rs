//! Shared types and models for Spores & Outdoors
//!
//! This crate contains the weather normalizer, the activity scorers and the
//! report types shared between the backend server and the browser (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
