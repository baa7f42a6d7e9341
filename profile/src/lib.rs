//! # User Profile Store
//!
//! Holds the authenticated user and their address book, used to gate
//! checkout.
//!
//! ## Contract highlights
//!
//! - Every address operation is a no-op while logged out
//! - At most one address carries `is_default`; `SetDefaultAddress`
//!   re-enforces the exclusivity on every call by sweeping the whole list
//! - The store performs no validation: the UI layer vets inputs before
//!   they get here

pub mod reducer;
pub mod types;

pub use reducer::{ProfileEnvironment, ProfileReducer};
pub use types::{AddressId, ProfileUpdate, User, UserAction, UserAddress, UserState};
