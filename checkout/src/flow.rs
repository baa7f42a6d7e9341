//! The checkout gate and place-order coordinator.

use crate::payment::{PaymentDeclined, PaymentProcessor};
use crate::session::{CartStore, OrderStore, ProfileStore, Session};
use freshcart_cart::CartAction;
use freshcart_core::environment::Clock;
use freshcart_orders::{Order, OrderAction, OrderId, OrderStatus, PaymentMethod};
use freshcart_runtime::StoreError;
use std::sync::Arc;
use thiserror::Error;

/// Display estimate attached to every freshly placed order
const ESTIMATED_DELIVERY_WINDOW: &str = "30-45 minutes";

/// Where the flow must send the user before payment can proceed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectTo {
    /// No authenticated user: sign in first
    Login,
    /// No default delivery address chosen: capture one first
    AddressEntry,
}

/// Failures surfaced by the checkout flow
///
/// The stores themselves never error; everything here comes from the gate,
/// the simulated payment step, or a torn-down session.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Gating failed; the flow must redirect before checkout can be retried
    #[error("checkout blocked: redirect required")]
    Blocked(RedirectTo),

    /// The (simulated) payment was declined
    ///
    /// Shown to the user with a retry affordance; the flow never retries on
    /// its own.
    #[error(transparent)]
    PaymentDeclined(#[from] PaymentDeclined),

    /// The session's stores are shutting down
    #[error(transparent)]
    SessionClosed(#[from] StoreError),
}

/// Coordinates cart, orders, and profile at checkout time
///
/// Holds cheap clones of the session's stores; all state stays with the
/// stores themselves.
pub struct CheckoutFlow<C: Clock> {
    cart: CartStore,
    orders: OrderStore,
    profile: ProfileStore,
    payment: Arc<dyn PaymentProcessor>,
    clock: C,
}

impl<C: Clock> CheckoutFlow<C> {
    /// Create a flow over the session's stores
    pub fn new(session: &Session, payment: Arc<dyn PaymentProcessor>, clock: C) -> Self {
        Self {
            cart: session.cart.clone(),
            orders: session.orders.clone(),
            profile: session.profile.clone(),
            payment,
            clock,
        }
    }

    /// Decide whether the user may proceed to payment
    ///
    /// Requires an authenticated user with a default address chosen;
    /// otherwise returns where the flow has to redirect first.
    ///
    /// # Errors
    ///
    /// Returns the required [`RedirectTo`] target when gating fails.
    pub async fn gate(&self) -> Result<(), RedirectTo> {
        self.profile
            .state(|state| {
                if !state.is_authenticated || state.user.is_none() {
                    return Err(RedirectTo::Login);
                }
                let has_default = state
                    .user
                    .as_ref()
                    .is_some_and(|user| user.default_address_id.is_some());
                if has_default {
                    Ok(())
                } else {
                    Err(RedirectTo::AddressEntry)
                }
            })
            .await
    }

    /// Place an order from the current cart
    ///
    /// Gates, charges the cart total through the payment port, records the
    /// order (which also makes it current), and then clears the cart. There
    /// is no transaction spanning the last two steps; see the crate docs
    /// for the accepted inconsistency window.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Blocked`] when gating fails; nothing is charged
    /// - [`CheckoutError::PaymentDeclined`] when the charge is rejected;
    ///   the cart is left untouched for retry
    /// - [`CheckoutError::SessionClosed`] when the stores are shutting down
    pub async fn place_order(&self, method: PaymentMethod) -> Result<OrderId, CheckoutError> {
        self.gate().await.map_err(CheckoutError::Blocked)?;

        let (items, total) = self
            .cart
            .state(|cart| (cart.items.clone(), cart.total))
            .await;

        self.payment.charge(method, total)?;

        let delivery_address = self
            .profile
            .state(|state| {
                state
                    .user
                    .as_ref()
                    .and_then(|user| user.default_address())
                    .map(|address| address.street.clone())
                    .unwrap_or_default()
            })
            .await;

        let now = self.clock.now();
        let order_id = OrderId::new(format!("ORD-{}", now.timestamp_millis()));
        let order = Order {
            id: order_id.clone(),
            items,
            total,
            status: OrderStatus::Pending,
            delivery_address,
            payment_method: method,
            created_at: now,
            estimated_delivery_time: Some(ESTIMATED_DELIVERY_WINDOW.to_string()),
        };

        tracing::info!(%order_id, %total, "placing order");
        self.orders
            .send(OrderAction::CreateOrder { order })
            .await?;
        self.cart.send(CartAction::ClearCart).await?;

        Ok(order_id)
    }
}
