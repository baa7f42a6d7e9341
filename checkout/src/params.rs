//! Typed navigation-boundary parameters.
//!
//! These are the only typed surfaces between the excluded UI layer and the
//! stores: the values the surrounding screens pass into the flows that wrap
//! store operations. The stores trust them as-is.

use freshcart_cart::CartItem;
use freshcart_orders::{OrderId, OrderStatus};
use freshcart_storage::Coordinates;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters handed to the OTP step after phone entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpParams {
    /// Phone number as entered, without the country code
    pub phone_number: String,
    /// Country dial code, e.g. "+44"
    pub country_code: String,
}

/// Parameters handed to the address steps after a location is resolved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationParams {
    /// Resolved address display string
    pub address: String,
    /// Where the pin was dropped
    pub coordinates: Coordinates,
}

/// Parameters handed to the checkout step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutParams {
    /// Snapshot of the cart lines
    pub items: Vec<CartItem>,
    /// Snapshot of the cart total
    pub total: Decimal,
}

/// Parameters handed to the order tracking step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingParams {
    /// Order being tracked
    pub order_id: OrderId,
    /// Status at the moment of navigation
    pub status: OrderStatus,
}
