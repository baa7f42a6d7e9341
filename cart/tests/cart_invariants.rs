//! Property tests for the cart store's algebraic laws.

use freshcart_cart::{CartAction, CartEnvironment, CartItem, CartReducer, CartState, ProductId};
use freshcart_core::reducer::Reducer;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

const PRODUCTS: [&str; 4] = ["milk-1", "bread-2", "eggs-3", "rice-4"];

fn arb_product() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PRODUCTS.to_vec())
}

fn arb_action() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        (arb_product(), 1u32..500, 1u32..5).prop_map(|(id, pence, quantity)| {
            CartAction::AddItem {
                item: CartItem::new(
                    ProductId::new(id),
                    id,
                    Decimal::new(i64::from(pence), 2),
                    quantity,
                    format!("products/{id}.png"),
                ),
            }
        }),
        (arb_product(), 0u32..10).prop_map(|(id, quantity)| CartAction::UpdateQuantity {
            id: ProductId::new(id),
            quantity,
        }),
        arb_product().prop_map(|id| CartAction::RemoveItem {
            id: ProductId::new(id),
        }),
        Just(CartAction::ClearCart),
    ]
}

fn apply(state: &mut CartState, action: CartAction) {
    CartReducer::new().reduce(state, action, &CartEnvironment::new());
}

proptest! {
    /// The derived total always equals the recomputed sum of line totals,
    /// quantities never drop below 1, and ids stay unique — for every
    /// action sequence.
    #[test]
    fn cart_invariants_hold_under_any_sequence(
        actions in prop::collection::vec(arb_action(), 0..40)
    ) {
        let mut state = CartState::new();
        for action in actions {
            apply(&mut state, action);

            let expected: Decimal = state.items.iter().map(CartItem::line_total).sum();
            prop_assert_eq!(state.total, expected);
            prop_assert!(state.items.iter().all(|line| line.quantity >= 1));

            let mut seen = HashSet::new();
            prop_assert!(state.items.iter().all(|line| seen.insert(line.id.clone())));
        }
    }

    /// `UpdateQuantity` below 1 never changes the state (clamp law).
    #[test]
    fn quantity_below_one_is_a_noop(
        setup in prop::collection::vec(arb_action(), 0..20),
        id in arb_product(),
    ) {
        let mut state = CartState::new();
        for action in setup {
            apply(&mut state, action);
        }

        let before = state.clone();
        apply(&mut state, CartAction::UpdateQuantity { id: ProductId::new(id), quantity: 0 });
        prop_assert_eq!(state, before);
    }

    /// Removing twice produces the same state as removing once.
    #[test]
    fn remove_item_is_idempotent(
        setup in prop::collection::vec(arb_action(), 0..20),
        id in arb_product(),
    ) {
        let mut state = CartState::new();
        for action in setup {
            apply(&mut state, action);
        }

        apply(&mut state, CartAction::RemoveItem { id: ProductId::new(id) });
        let once = state.clone();
        apply(&mut state, CartAction::RemoveItem { id: ProductId::new(id) });
        prop_assert_eq!(state, once);
    }
}
