//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters implement the driven ports declared in `ports::outbound`.

pub mod memory_store;

pub use memory_store::*;
