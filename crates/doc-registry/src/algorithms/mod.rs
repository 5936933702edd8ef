//! # Algorithms
//!
//! Registration and ownership-proof logic over the domain types and the
//! `DocumentStore` port.

pub mod ownership;
pub mod registration;

pub use ownership::prove_ownership;
pub use registration::{register_document, validate_submission};
