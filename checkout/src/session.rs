//! The session root: every store, constructed once and torn down together.
//!
//! Stores are explicit constructed objects passed by reference into
//! whatever needs them — there are no ambient module-level singletons. A
//! [`Session`] is built at process/session start and [`Session::shutdown`]
//! at session end, which also cancels any in-flight delivery timelines.

use freshcart_cart::{CartAction, CartEnvironment, CartReducer, CartState};
use freshcart_orders::{OrderAction, OrderEnvironment, OrderReducer, OrderState, TimelineSchedule};
use freshcart_profile::{ProfileEnvironment, ProfileReducer, UserAction, UserState};
use freshcart_runtime::Store;

/// The cart store runtime
pub type CartStore = Store<CartState, CartAction, CartEnvironment, CartReducer>;

/// The order store runtime
pub type OrderStore = Store<OrderState, OrderAction, OrderEnvironment, OrderReducer>;

/// The user profile store runtime
pub type ProfileStore = Store<UserState, UserAction, ProfileEnvironment, ProfileReducer>;

/// All of a session's stores
///
/// Each store owns its state exclusively; no two stores mutate the same
/// state. Cross-store ordering (cart cleared after order created, ...) is
/// the caller's, coordinated by [`crate::CheckoutFlow`].
pub struct Session {
    /// Working set of items to purchase
    pub cart: CartStore,
    /// Placed orders and the delivery timeline
    pub orders: OrderStore,
    /// Authenticated user and address book
    pub profile: ProfileStore,
}

impl Session {
    /// Build a session with the given delivery timeline schedule
    #[must_use]
    pub fn new(schedule: TimelineSchedule) -> Self {
        Self {
            cart: Store::new(CartState::new(), CartReducer::new(), CartEnvironment::new()),
            orders: Store::new(
                OrderState::new(),
                OrderReducer::new(),
                OrderEnvironment::new(schedule),
            ),
            profile: Store::new(
                UserState::new(),
                ProfileReducer::new(),
                ProfileEnvironment::new(),
            ),
        }
    }

    /// Tear every store down
    ///
    /// Pending delivery-timeline transitions are cancelled as part of store
    /// shutdown; subsequent actions on any store are rejected.
    pub fn shutdown(&self) {
        self.cart.shutdown();
        self.orders.shutdown();
        self.profile.shutdown();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TimelineSchedule::default())
    }
}
