//! The Bharat Collections storefront library.
//!
//! Client-side storefront logic: cart and wishlist stores mirrored to local
//! storage, a filterable product grid, shared page fragments, and a REST
//! client for the shop backend. Surfaces such as the `bharat` CLI drive it
//! through the [`Storefront`] page controller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod components;
pub mod config;
pub mod contact;
pub mod error;
pub mod notify;
pub mod render;
pub mod storage;
pub mod store;
pub mod storefront;

pub use error::{Result, StorefrontError};
pub use storefront::Storefront;
