//! Reducer logic for the order store and the simulated delivery timeline.

use crate::types::{OrderAction, OrderId, OrderState, OrderStatus};
use freshcart_core::{
    SmallVec,
    effect::{Effect, EffectGroup},
    reducer::Reducer,
    smallvec,
};
use std::time::Duration;

/// The delayed status transitions a tracked order walks through
///
/// Offsets are measured from the same reference start (the moment tracking
/// begins), not from each other.
#[derive(Clone, Debug)]
pub struct TimelineSchedule {
    /// `(target status, offset from start)` pairs, fired independently
    pub steps: Vec<(OrderStatus, Duration)>,
}

impl TimelineSchedule {
    /// Creates a schedule from explicit `(status, offset)` steps
    #[must_use]
    pub const fn new(steps: Vec<(OrderStatus, Duration)>) -> Self {
        Self { steps }
    }

    /// The standard pipeline with every offset scaled to a multiple of
    /// `unit` — `unit = 5s` gives the production schedule, a few hundred
    /// milliseconds gives a demo-friendly one
    #[must_use]
    pub fn scaled(unit: Duration) -> Self {
        Self::new(vec![
            (OrderStatus::Confirmed, unit),
            (OrderStatus::Preparing, unit * 2),
            (OrderStatus::OutForDelivery, unit * 3),
            (OrderStatus::Delivered, unit * 4),
        ])
    }
}

impl Default for TimelineSchedule {
    /// Confirmed +5s, Preparing +10s, OutForDelivery +15s, Delivered +20s
    fn default() -> Self {
        Self::scaled(Duration::from_secs(5))
    }
}

/// Environment dependencies for the order reducer
#[derive(Clone, Debug, Default)]
pub struct OrderEnvironment {
    /// Delivery timeline offsets used by `StartTracking`
    pub schedule: TimelineSchedule,
}

impl OrderEnvironment {
    /// Creates a new `OrderEnvironment`
    #[must_use]
    pub const fn new(schedule: TimelineSchedule) -> Self {
        Self { schedule }
    }
}

/// The cancellation group covering all of an order's pending timeline
/// transitions
#[must_use]
pub fn tracking_group(order_id: &OrderId) -> EffectGroup {
    EffectGroup::new(format!("order-tracking/{order_id}"))
}

/// Reducer for the order store
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderReducer;

impl OrderReducer {
    /// Creates a new `OrderReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for OrderReducer {
    type State = OrderState;
    type Action = OrderAction;
    type Environment = OrderEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            OrderAction::CreateOrder { order } => {
                state.current_order = Some(order.clone());
                state.orders.push(order);
            },

            OrderAction::UpdateOrderStatus { order_id, status } => {
                if let Some(order) = state.orders.iter_mut().find(|order| order.id == order_id) {
                    order.status = status;
                }
                // The current order is an independent copy; sync it
                // explicitly rather than through the list entry
                if let Some(current) = state
                    .current_order
                    .as_mut()
                    .filter(|current| current.id == order_id)
                {
                    current.status = status;
                }
            },

            OrderAction::SetCurrentOrder { order } => {
                state.current_order = order;
            },

            OrderAction::ClearOrders => {
                state.orders.clear();
                state.current_order = None;
            },

            OrderAction::StartTracking { order_id } => {
                let transitions = env
                    .schedule
                    .steps
                    .iter()
                    .map(|&(status, offset)| Effect::Delay {
                        duration: offset,
                        action: Box::new(OrderAction::UpdateOrderStatus {
                            order_id: order_id.clone(),
                            status,
                        }),
                    })
                    .collect();

                return smallvec![Effect::cancellable(
                    tracking_group(&order_id),
                    Effect::Parallel(transitions),
                )];
            },

            OrderAction::StopTracking { order_id } => {
                return smallvec![Effect::Cancel(tracking_group(&order_id))];
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Order, PaymentMethod};
    use chrono::{DateTime, Utc};
    use freshcart_cart::{CartItem, ProductId};
    use freshcart_core::environment::Clock;
    use freshcart_testing::{ReducerTest, assertions, test_clock};
    use rust_decimal::Decimal;

    fn order(id: &str) -> Order {
        Order {
            id: OrderId::new(id),
            items: vec![CartItem::new(
                ProductId::new("milk-1"),
                "Whole Milk",
                Decimal::from(28),
                1,
                "products/milk-1.png",
            )],
            total: Decimal::from(28),
            status: OrderStatus::Pending,
            delivery_address: "221B Baker Street".to_string(),
            payment_method: PaymentMethod::Card,
            created_at: created_at(),
            estimated_delivery_time: Some("30-45 minutes".to_string()),
        }
    }

    fn created_at() -> DateTime<Utc> {
        test_clock().now()
    }

    fn env() -> OrderEnvironment {
        OrderEnvironment::default()
    }

    #[test]
    fn create_order_appends_and_focuses() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::CreateOrder {
                order: order("ORD-1"),
            })
            .then_state(|state| {
                assert_eq!(state.orders.len(), 1);
                assert_eq!(
                    state.current_order.as_ref().map(|o| o.id.as_str()),
                    Some("ORD-1")
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn update_status_syncs_both_copies() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::CreateOrder {
                order: order("ORD-1"),
            })
            .when_action(OrderAction::UpdateOrderStatus {
                order_id: OrderId::new("ORD-1"),
                status: OrderStatus::Confirmed,
            })
            .then_state(|state| {
                assert_eq!(state.orders[0].status, OrderStatus::Confirmed);
                assert_eq!(
                    state.current_order.as_ref().map(|o| o.status),
                    Some(OrderStatus::Confirmed)
                );
            })
            .run();
    }

    #[test]
    fn update_status_unknown_id_is_noop() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::CreateOrder {
                order: order("ORD-1"),
            })
            .when_action(OrderAction::UpdateOrderStatus {
                order_id: OrderId::new("ORD-404"),
                status: OrderStatus::Delivered,
            })
            .then_state(|state| {
                assert_eq!(state.orders[0].status, OrderStatus::Pending);
                assert_eq!(
                    state.current_order.as_ref().map(|o| o.status),
                    Some(OrderStatus::Pending)
                );
            })
            .run();
    }

    #[test]
    fn update_status_leaves_unrelated_current_order_alone() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::CreateOrder {
                order: order("ORD-1"),
            })
            .when_action(OrderAction::CreateOrder {
                order: order("ORD-2"),
            })
            .when_action(OrderAction::UpdateOrderStatus {
                order_id: OrderId::new("ORD-1"),
                status: OrderStatus::Preparing,
            })
            .then_state(|state| {
                assert_eq!(state.orders[0].status, OrderStatus::Preparing);
                // ORD-2 is current and untouched
                let current = state.current_order.as_ref().unwrap();
                assert_eq!(current.id.as_str(), "ORD-2");
                assert_eq!(current.status, OrderStatus::Pending);
            })
            .run();
    }

    #[test]
    fn backward_status_updates_are_not_rejected() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::CreateOrder {
                order: order("ORD-1"),
            })
            .when_action(OrderAction::UpdateOrderStatus {
                order_id: OrderId::new("ORD-1"),
                status: OrderStatus::Delivered,
            })
            .when_action(OrderAction::UpdateOrderStatus {
                order_id: OrderId::new("ORD-1"),
                status: OrderStatus::Pending,
            })
            .then_state(|state| {
                assert_eq!(state.orders[0].status, OrderStatus::Pending);
            })
            .run();
    }

    #[test]
    fn set_current_order_is_unvalidated() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::SetCurrentOrder {
                order: Some(order("ORD-9")),
            })
            .then_state(|state| {
                // Permitted transient inconsistency: not in the list
                assert!(state.orders.is_empty());
                assert_eq!(
                    state.current_order.as_ref().map(|o| o.id.as_str()),
                    Some("ORD-9")
                );
            })
            .run();
    }

    #[test]
    fn clear_orders_resets_everything() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::CreateOrder {
                order: order("ORD-1"),
            })
            .when_action(OrderAction::ClearOrders)
            .then_state(|state| {
                assert!(state.orders.is_empty());
                assert!(state.current_order.is_none());
            })
            .run();
    }

    #[test]
    fn start_tracking_schedules_one_cancellable_group() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::StartTracking {
                order_id: OrderId::new("ORD-1"),
            })
            .then_state(|state| {
                // Scheduling mutates nothing
                assert!(state.orders.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_delay_effect(effects);
                assert!(matches!(
                    &effects[0],
                    Effect::Cancellable { group, effect }
                        if group.as_str() == "order-tracking/ORD-1"
                            && matches!(&**effect, Effect::Parallel(steps) if steps.len() == 4)
                ));
            })
            .run();
    }

    #[test]
    fn stop_tracking_cancels_the_group() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::StopTracking {
                order_id: OrderId::new("ORD-1"),
            })
            .then_effects(|effects| {
                assertions::assert_cancels_group(effects, "order-tracking/ORD-1");
            })
            .run();
    }

    #[test]
    fn default_schedule_offsets_are_absolute() {
        let schedule = TimelineSchedule::default();
        assert_eq!(
            schedule.steps,
            vec![
                (OrderStatus::Confirmed, Duration::from_secs(5)),
                (OrderStatus::Preparing, Duration::from_secs(10)),
                (OrderStatus::OutForDelivery, Duration::from_secs(15)),
                (OrderStatus::Delivered, Duration::from_secs(20)),
            ]
        );
    }
}
