//! Drives a full storefront session end to end: capture an address, log in,
//! fill the cart, place an order, and watch the simulated delivery pipeline
//! run to completion on a compressed schedule.

use anyhow::Result;
use chrono::Utc;
use freshcart_cart::{CartAction, CartItem, ProductId};
use freshcart_checkout::{CheckoutFlow, MockPaymentProcessor, Session};
use freshcart_core::environment::SystemClock;
use freshcart_orders::{OrderAction, OrderStatus, PaymentMethod, TimelineSchedule};
use freshcart_profile::{AddressId, User, UserAction, UserAddress};
use freshcart_storage::{AddressBook, AddressRecord, Coordinates, MemoryKv, RecentList};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Address capture, persisted best-effort like the device storage
    let kv = Arc::new(MemoryKv::new());
    let book = AddressBook::new(kv.clone());
    let saved = RecentList::saved_locations(kv);

    let display = book.insert(&AddressRecord {
        kind: "Home".to_string(),
        address: "221B Baker Street".to_string(),
        flat_number: "B".to_string(),
        landmark: "Next to the museum".to_string(),
        instruction: "Ring twice".to_string(),
        contact_name: "J. Watson".to_string(),
        contact_phone: "+44 20 7946 0000".to_string(),
        coordinates: Coordinates {
            latitude: 51.5238,
            longitude: -0.1586,
        },
        timestamp: Utc::now(),
    });
    saved.push(&display);
    println!("saved locations: {:?}", saved.all());

    // Session root: one store each for cart, orders, and profile.
    // Timeline compressed to 300ms steps so the demo finishes quickly.
    let session = Session::new(TimelineSchedule::scaled(Duration::from_millis(300)));

    session
        .profile
        .send(UserAction::Login {
            user: User {
                id: "user-1".to_string(),
                name: "J. Watson".to_string(),
                email: "watson@example.com".to_string(),
                phone: "+44 20 7946 0000".to_string(),
                addresses: vec![UserAddress {
                    id: AddressId::new("addr-1"),
                    street: "221B Baker Street".to_string(),
                    city: "London".to_string(),
                    state: "Greater London".to_string(),
                    zip_code: "NW1 6XE".to_string(),
                    is_default: false,
                }],
                default_address_id: None,
            },
        })
        .await?;
    session
        .profile
        .send(UserAction::SetDefaultAddress {
            id: AddressId::new("addr-1"),
        })
        .await?;

    for (id, name, price) in [
        ("milk-1", "Whole Milk", 28),
        ("bread-2", "Sourdough", 45),
        ("eggs-3", "Free Range Eggs", 62),
    ] {
        session
            .cart
            .send(CartAction::AddItem {
                item: CartItem::new(
                    ProductId::new(id),
                    name,
                    Decimal::from(price),
                    1,
                    format!("products/{id}.png"),
                ),
            })
            .await?;
    }
    let total = session.cart.state(|cart| cart.total).await;
    println!("cart total: {total}");

    let flow = CheckoutFlow::new(
        &session,
        Arc::new(MockPaymentProcessor::approving()),
        SystemClock,
    );
    let order_id = flow.place_order(PaymentMethod::Card).await?;
    println!("order placed: {order_id}");

    // Watch the simulated pipeline via the store's action broadcast
    let mut updates = session.orders.subscribe_actions();
    session
        .orders
        .send(OrderAction::StartTracking {
            order_id: order_id.clone(),
        })
        .await?;

    while let Ok(action) = updates.recv().await {
        if let OrderAction::UpdateOrderStatus { status, .. } = action {
            println!("  status -> {status}");
            if status == OrderStatus::Delivered {
                break;
            }
        }
    }

    session.shutdown();
    println!("session closed");
    Ok(())
}
