//! Sandpiper Core - Shared types library.
//!
//! This crate provides common types used across all Sandpiper components:
//! - `cart` - Client-side cart state library
//! - `cli` - Command-line consumer of the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype product id, cart line items, and stock levels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
