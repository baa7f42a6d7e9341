//! # Cart Store
//!
//! Maintains the working set of items a user intends to purchase.
//!
//! The cart is a **pure state machine**: every operation is a synchronous
//! transition with no side effects, and the derived total is recomputed
//! after every transition rather than adjusted incrementally.
//!
//! ## Contract highlights
//!
//! - Adding an id already in the cart merges quantities; it never creates a
//!   duplicate line
//! - `UpdateQuantity` below 1 is a no-op — decrementing never removes an
//!   item implicitly; removal is its own operation
//! - Unknown ids are silent no-ops throughout

pub mod reducer;
pub mod types;

pub use reducer::{CartEnvironment, CartReducer};
pub use types::{CartAction, CartItem, CartState, ProductId};
