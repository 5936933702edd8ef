//! # Shared Types Crate
//!
//! Primitives shared across the registry workspace.
//!
//! ## Design Principles
//!
//! - **Fixed-width identities**: An `Address` is always 20 bytes and a `Hash`
//!   is always 32 bytes. Malformed input is rejected at parse time, so the
//!   rest of the system never handles a value of the wrong width.
//! - **Zero is a sentinel**: `Address::ZERO` is the null identity and
//!   `Hash::ZERO` is the "empty hash". Neither is ever a valid key.
//! - **Hex on the wire**: Both types serialize as `0x`-prefixed lowercase hex.

pub mod entities;
pub mod errors;
pub mod hashing;

pub use entities::{Address, Hash};
pub use errors::ParseError;
pub use hashing::keccak256;
