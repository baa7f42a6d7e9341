//! # Order Store
//!
//! Owns the historical and current record of placed orders, and the
//! simulated delivery pipeline that advances an order's status after
//! checkout.
//!
//! ## Contract highlights
//!
//! - The store neither generates nor rejects order ids; uniqueness is the
//!   caller's responsibility
//! - Status updates for unknown ids are silent no-ops
//! - `current_order` is an independent copy of its list entry, kept in sync
//!   explicitly on every status update — never an alias
//! - The delivery timeline is one cancellable effect group per order:
//!   tearing down the tracking context cancels every pending transition at
//!   once
//! - Status updates perform no monotonicity check; only the timeline itself
//!   is forward-only

pub mod reducer;
pub mod types;

pub use reducer::{OrderEnvironment, OrderReducer, TimelineSchedule, tracking_group};
pub use types::{Order, OrderAction, OrderId, OrderState, OrderStatus, PaymentMethod};
