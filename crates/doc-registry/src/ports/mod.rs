//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the document registry.
//!
//! - **Driving Ports (Inbound)**: `DocumentRegistryApi`
//! - **Driven Ports (Outbound)**: `DocumentStore`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
