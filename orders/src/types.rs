//! Domain types for the order store.

use chrono::{DateTime, Utc};
use freshcart_cart::CartItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unique identifier for a placed order
///
/// Generated by the checkout flow, never by the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an `OrderId` from any string-like id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery pipeline stage of an order
///
/// The simulated timeline walks these strictly forward. Explicit
/// [`OrderAction::UpdateOrderStatus`] calls are not order-checked, so an
/// external caller can move a status backward.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received, not yet confirmed
    Pending,
    /// Order confirmed by the (simulated) fulfilment side
    Confirmed,
    /// Items being picked and packed
    Preparing,
    /// Courier on the way
    OutForDelivery,
    /// Order delivered
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
        };
        write!(f, "{label}")
    }
}

/// How the order is paid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment (simulated)
    Card,
    /// Cash on delivery
    Cash,
}

/// A placed order
///
/// `items` is a snapshot copied from the cart at creation time — never a
/// shared reference into it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order id (caller-generated)
    pub id: OrderId,
    /// Snapshot of the cart lines at checkout
    pub items: Vec<CartItem>,
    /// Snapshot of the cart total at checkout
    pub total: Decimal,
    /// Current pipeline stage
    pub status: OrderStatus,
    /// Resolved delivery address line
    pub delivery_address: String,
    /// Payment method chosen at checkout
    pub payment_method: PaymentMethod,
    /// When the order was placed
    pub created_at: DateTime<Utc>,
    /// Display estimate shown while tracking, e.g. "30-45 minutes"
    pub estimated_delivery_time: Option<String>,
}

/// State of the order store
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderState {
    /// Every order placed this session, in creation order
    pub orders: Vec<Order>,
    /// The order currently in focus (tracking view); an independent copy,
    /// not an alias into `orders`
    pub current_order: Option<Order>,
}

impl OrderState {
    /// Creates an empty order state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the listed order with the given id, if any
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }
}

/// Actions accepted by the order store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OrderAction {
    /// Append an order and make it current
    ///
    /// The store trusts `order.id` to be unique; a duplicate is a caller
    /// bug, not a store-detected error.
    CreateOrder {
        /// The order to record
        order: Order,
    },

    /// Replace the status of the matching order
    ///
    /// Updates the list entry and, when `current_order` has the same id,
    /// the current copy too. Unknown ids are a silent no-op. No
    /// monotonicity check is performed.
    UpdateOrderStatus {
        /// Order to update
        order_id: OrderId,
        /// New pipeline stage
        status: OrderStatus,
    },

    /// Directly assign the current order, without validating it against the
    /// list (caller discipline required)
    SetCurrentOrder {
        /// The order to focus, or `None` to clear
        order: Option<Order>,
    },

    /// Drop all orders and clear the current order
    ClearOrders,

    /// Start the simulated delivery pipeline for an order
    ///
    /// Schedules the full status sequence as one cancellable group of
    /// delayed transitions, all measured from now. Forward-only and
    /// unconditional: it does not check whether the status was already
    /// advanced out of band.
    StartTracking {
        /// Order whose pipeline to simulate
        order_id: OrderId,
    },

    /// Cancel every pending timeline transition for an order, as a group
    ///
    /// Sent when the tracking context is torn down before the pipeline
    /// completes.
    StopTracking {
        /// Order whose pipeline to cancel
        order_id: OrderId,
    },
}
