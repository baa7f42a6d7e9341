//! # Checkout
//!
//! The cross-cutting checkout policy: the session root that owns every
//! store, the gate that decides whether payment may proceed, and the
//! place-order coordinator.
//!
//! ## Ordering guarantees
//!
//! Placing an order records it on the order store **and then** clears the
//! cart. The two stores share no transaction boundary: an early return
//! between the two steps can leave the order recorded and the cart
//! non-empty. That inconsistency window is accepted by design — the flow is
//! caller-driven, and the caller retries by placing again, never by
//! patching state.

pub mod flow;
pub mod params;
pub mod payment;
pub mod session;

pub use flow::{CheckoutError, CheckoutFlow, RedirectTo};
pub use payment::{MockPaymentProcessor, PaymentDeclined, PaymentProcessor};
pub use session::{CartStore, OrderStore, ProfileStore, Session};
