//! Core types for Sandpiper.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod item;

pub use id::ProductId;
pub use item::{Product, Stock, subtotal};
