//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the document registry.
//! NO I/O, NO logging, NO persistence concerns.
//!
//! - This is the **inner layer** of the hexagonal architecture.
//! - Dependencies point INWARD only (adapters depend on this, not vice versa).

pub mod access_control;
pub mod entities;
pub mod errors;
pub mod identity;
pub mod invariants;
pub mod value_objects;

pub use access_control::*;
pub use entities::*;
pub use errors::*;
pub use identity::*;
pub use invariants::*;
pub use value_objects::*;
