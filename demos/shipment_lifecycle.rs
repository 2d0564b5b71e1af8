//! Shipment Lifecycle
//!
//! Walks one shipment from posting to delivery, shows the rejections the
//! store hands back for illegal moves, and exports the store to a checkpoint.
//!
//! Key concepts:
//! - Acceptance records traveler, fee and commission in one step
//! - Every other move is checked against the transition table
//! - Terminal statuses refuse further changes
//! - The full history is kept per shipment
//!
//! Run with: RUST_LOG=debug cargo run --example shipment_lifecycle

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use shipment_lifecycle::checkpoint::StoreCheckpoint;
use shipment_lifecycle::core::{ItemInfo, NewShipment, RecipientInfo, Route};
use shipment_lifecycle::{ShipmentFilter, ShipmentStatus, ShipmentStore, TransitionPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    println!("=== Shipment Lifecycle ===\n");

    println!("Transition table:");
    for (from, to) in TransitionPolicy::edges() {
        println!("  {from} -> {to}");
    }
    println!();

    let store = ShipmentStore::builder()
        .commission_rate(Decimal::new(10, 2))
        .build()?;

    let posted = store.create_shipment(NewShipment {
        sender_id: "sender-1".to_string(),
        recipient: RecipientInfo {
            name: "Anna Schmidt".to_string(),
            address: "Marienplatz 1, 80331 München".to_string(),
            phone: Some("+49 89 123456".to_string()),
        },
        item: ItemInfo {
            description: "Kleine Box mit Büchern".to_string(),
            weight_kg: Some(Decimal::new(25, 1)),
            declared_value: Decimal::from(100),
        },
        route: Route::new("Berlin, Deutschland", "München, Deutschland"),
        estimated_delivery: Some(Utc::now() + Duration::days(2)),
        duties_and_taxes: Decimal::ZERO,
    })?;
    println!(
        "Posted {} ({} -> {}), confirmation code {}",
        posted.id, posted.route.origin, posted.route.destination, posted.confirmation_code
    );

    let accepted = store.accept_shipment(&posted.id, "carrier-1", Decimal::new(400, 1))?;
    println!(
        "Accepted by {}: fee {}, commission {}, total {}",
        accepted.traveler_id.as_deref().unwrap_or("-"),
        accepted.agreed_fee,
        accepted.commission,
        accepted
            .total_cost()
            .map(|total| total.to_string())
            .unwrap_or_else(|| "out of range".to_string())
    );

    store.transition_status(&posted.id, ShipmentStatus::InTransit, None)?;
    println!("Now {}", ShipmentStatus::InTransit);

    if let Err(err) = store.transition_status(&posted.id, ShipmentStatus::Accepted, None) {
        println!("Rejected ({:?}): {err}", err.kind());
    }

    let delivered = store.transition_status(
        &posted.id,
        ShipmentStatus::Delivered,
        Some("handed over at the door".to_string()),
    )?;
    println!(
        "Delivered at {}",
        delivered
            .delivered_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_default()
    );

    if let Err(err) = store.transition_status(&posted.id, ShipmentStatus::Disputed, None) {
        println!("Rejected ({:?}): {err}", err.kind());
    }

    println!("\nHistory:");
    for entry in store.get_history(&posted.id)?.entries() {
        println!(
            "  {}  {}{}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.status,
            entry
                .note
                .as_deref()
                .map(|note| format!("  ({note})"))
                .unwrap_or_default()
        );
    }

    println!("\n=== Checkpoint ===\n");
    let abandoned = store.create_shipment(NewShipment {
        sender_id: "sender-2".to_string(),
        recipient: RecipientInfo {
            name: "Jonas Weber".to_string(),
            address: "Zeil 10, Frankfurt".to_string(),
            phone: None,
        },
        item: ItemInfo {
            description: "Dokumente".to_string(),
            weight_kg: None,
            declared_value: Decimal::from(20),
        },
        route: Route::new("Hamburg", "Frankfurt"),
        estimated_delivery: None,
        duties_and_taxes: Decimal::ZERO,
    })?;
    store.transition_status(
        &abandoned.id,
        ShipmentStatus::Canceled,
        Some("no carrier found".to_string()),
    )?;

    let binary = store.checkpoint().to_binary()?;
    let json = store.checkpoint().to_json()?;
    println!("Binary checkpoint: {} bytes", binary.len());
    println!("JSON checkpoint: {} bytes", json.len());

    let restored = ShipmentStore::restore(
        StoreCheckpoint::from_binary(&binary)?,
        store.config().clone(),
        Box::new(shipment_lifecycle::store::UuidIdGenerator),
    )?;
    let canceled = restored.list_shipments(&ShipmentFilter::new().status(ShipmentStatus::Canceled));
    println!(
        "Restored {} shipments, {} canceled",
        restored.len(),
        canceled.len()
    );

    Ok(())
}
