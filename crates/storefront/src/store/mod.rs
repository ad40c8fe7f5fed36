//! Cart and wishlist state mirrored to local storage.
//!
//! Both stores own their items in memory and write the full list back to
//! storage after every mutation (last write wins). Storage failures are
//! logged; the in-memory change is kept so the page keeps working.

mod cart;
mod wishlist;

pub use cart::{AddToCart, CartItem, CartStore, parse_quantity};
pub use wishlist::{WishlistItem, WishlistStore};
