//! Reducer logic for the cart store.

use crate::types::{CartAction, CartState};
use freshcart_core::{SmallVec, effect::Effect, reducer::Reducer};
use rust_decimal::Decimal;

/// Environment for the cart reducer
///
/// The cart is a pure state machine and needs no injected dependencies.
#[derive(Clone, Debug, Default)]
pub struct CartEnvironment;

impl CartEnvironment {
    /// Creates a new `CartEnvironment`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Reducer for the cart store
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddItem { item } => {
                if let Some(pos) = state.items.iter().position(|line| line.id == item.id) {
                    // Same product twice merges into one line
                    state.items[pos].quantity += item.quantity;
                } else {
                    state.items.push(item);
                }
                state.recompute_total();
            },

            CartAction::UpdateQuantity { id, quantity } => {
                if quantity < 1 {
                    // Clamp: decrementing below one never removes the line
                    return SmallVec::new();
                }
                if let Some(line) = state.items.iter_mut().find(|line| line.id == id) {
                    line.quantity = quantity;
                }
                state.recompute_total();
            },

            CartAction::RemoveItem { id } => {
                state.items.retain(|line| line.id != id);
                state.recompute_total();
            },

            CartAction::ClearCart => {
                state.items.clear();
                state.total = Decimal::ZERO;
            },
        }

        // Pure state machine - no side effects
        SmallVec::new()
    }
}
