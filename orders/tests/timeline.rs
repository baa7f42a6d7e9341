//! Delivery-timeline behavior against a live store, on paused time.

use chrono::Utc;
use freshcart_orders::{
    Order, OrderAction, OrderEnvironment, OrderId, OrderReducer, OrderState, OrderStatus,
    PaymentMethod,
};
use freshcart_runtime::Store;
use rust_decimal::Decimal;
use std::time::Duration;

type OrderStore = Store<OrderState, OrderAction, OrderEnvironment, OrderReducer>;

fn store() -> OrderStore {
    Store::new(
        OrderState::new(),
        OrderReducer::new(),
        OrderEnvironment::default(),
    )
}

fn order(id: &str) -> Order {
    Order {
        id: OrderId::new(id),
        items: Vec::new(),
        total: Decimal::from(50),
        status: OrderStatus::Pending,
        delivery_address: "221B Baker Street".to_string(),
        payment_method: PaymentMethod::Cash,
        created_at: Utc::now(),
        estimated_delivery_time: Some("30-45 minutes".to_string()),
    }
}

async fn status_of(store: &OrderStore, id: &str) -> OrderStatus {
    let id = OrderId::new(id);
    store
        .state(move |s| s.get(&id).map(|o| o.status))
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn timeline_advances_on_the_scheduled_offsets() {
    let store = store();
    store
        .send(OrderAction::CreateOrder {
            order: order("ORD-2"),
        })
        .await
        .unwrap();
    store
        .send(OrderAction::StartTracking {
            order_id: OrderId::new("ORD-2"),
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(status_of(&store, "ORD-2").await, OrderStatus::Confirmed);

    tokio::time::sleep(Duration::from_secs(5)).await; // t0 + 11s
    assert_eq!(status_of(&store, "ORD-2").await, OrderStatus::Preparing);

    tokio::time::sleep(Duration::from_secs(5)).await; // t0 + 16s
    assert_eq!(status_of(&store, "ORD-2").await, OrderStatus::OutForDelivery);

    tokio::time::sleep(Duration::from_secs(5)).await; // t0 + 21s
    assert_eq!(status_of(&store, "ORD-2").await, OrderStatus::Delivered);
}

#[tokio::test(start_paused = true)]
async fn timeline_updates_the_current_order_copy_too() {
    let store = store();
    store
        .send(OrderAction::CreateOrder {
            order: order("ORD-2"),
        })
        .await
        .unwrap();
    store
        .send(OrderAction::StartTracking {
            order_id: OrderId::new("ORD-2"),
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(21)).await;
    let current_status = store
        .state(|s| s.current_order.as_ref().map(|o| o.status))
        .await;
    assert_eq!(current_status, Some(OrderStatus::Delivered));
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_all_pending_transitions() {
    let store = store();
    store
        .send(OrderAction::CreateOrder {
            order: order("ORD-2"),
        })
        .await
        .unwrap();
    store
        .send(OrderAction::StartTracking {
            order_id: OrderId::new("ORD-2"),
        })
        .await
        .unwrap();

    // Tracking context torn down at t0 + 2s, before the first transition
    tokio::time::sleep(Duration::from_secs(2)).await;
    store
        .send(OrderAction::StopTracking {
            order_id: OrderId::new("ORD-2"),
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(status_of(&store, "ORD-2").await, OrderStatus::Pending);
}

#[tokio::test(start_paused = true)]
async fn teardown_only_affects_its_own_order() {
    let store = store();
    for id in ["ORD-2", "ORD-3"] {
        store
            .send(OrderAction::CreateOrder { order: order(id) })
            .await
            .unwrap();
        store
            .send(OrderAction::StartTracking {
                order_id: OrderId::new(id),
            })
            .await
            .unwrap();
    }

    store
        .send(OrderAction::StopTracking {
            order_id: OrderId::new("ORD-2"),
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(21)).await;
    assert_eq!(status_of(&store, "ORD-2").await, OrderStatus::Pending);
    assert_eq!(status_of(&store, "ORD-3").await, OrderStatus::Delivered);
}

#[tokio::test(start_paused = true)]
async fn out_of_band_updates_are_overrun_by_the_timeline() {
    let store = store();
    store
        .send(OrderAction::CreateOrder {
            order: order("ORD-2"),
        })
        .await
        .unwrap();
    store
        .send(OrderAction::StartTracking {
            order_id: OrderId::new("ORD-2"),
        })
        .await
        .unwrap();

    // An external caller jumps the pipeline ahead...
    store
        .send(OrderAction::UpdateOrderStatus {
            order_id: OrderId::new("ORD-2"),
            status: OrderStatus::Delivered,
        })
        .await
        .unwrap();

    // ...and the unconditional schedule visibly regresses it
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(status_of(&store, "ORD-2").await, OrderStatus::Confirmed);
}
