//! Bharat Core - Shared types library.
//!
//! This crate provides common types used across all storefront components:
//! - `storefront` - Cart, wishlist, product grid and backend client
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, SKUs, prices, emails, slugs and
//!   notification levels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
