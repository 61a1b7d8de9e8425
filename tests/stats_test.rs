//! Integration tests for the statistics aggregator, including the
//! capacity-2 end-to-end scenario.

mod helpers;

use helpers::database_helper::TestDatabase;
use helpers::test_data::{published_event, published_paid_event};
use schedula::models::rsvp::{CheckInMethod, RsvpStatus};
use schedula::services::ServiceFactory;
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_event_stats_counts_and_fill_rate() -> anyhow::Result<()> {
    let Some(db) = TestDatabase::connect().await else {
        return Ok(());
    };
    db.cleanup().await?;
    let services = ServiceFactory::new(db.pool.clone());

    let event = published_event(&services, Uuid::new_v4(), 4).await?;

    let mut rsvps = Vec::new();
    for _ in 0..6 {
        rsvps.push(services.ledger.register(event.id, Uuid::new_v4()).await?);
    }
    // 4 confirmed, 2 waitlisted; cancel one waitlisted, check in one confirmed
    services.ledger.cancel(rsvps[5].id).await?;
    services
        .ledger
        .check_in(rsvps[0].id, Uuid::new_v4(), CheckInMethod::Qr, None, None)
        .await?;

    let stats = services.stats.event_stats(event.id).await?;
    assert_eq!(stats.capacity, 4);
    assert_eq!(stats.confirmed, 4);
    assert_eq!(stats.waitlisted, 1);
    assert_eq!(stats.cancelled, 1);
    assert_eq!(stats.checked_in, 1);
    assert_eq!(stats.fill_rate, 1.0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_unknown_event_yields_zeroed_stats() -> anyhow::Result<()> {
    let Some(db) = TestDatabase::connect().await else {
        return Ok(());
    };
    db.cleanup().await?;
    let services = ServiceFactory::new(db.pool.clone());

    let stats = services.stats.event_stats(Uuid::new_v4()).await?;
    assert_eq!(stats.confirmed, 0);
    assert_eq!(stats.waitlisted, 0);
    assert_eq!(stats.checked_in, 0);
    assert_eq!(stats.fill_rate, 0.0);

    let totals = services.stats.organizer_totals(Uuid::new_v4()).await?;
    assert_eq!(totals.events, 0);
    assert_eq!(totals.confirmed, 0);
    assert_eq!(totals.revenue_cents, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_organizer_totals_and_revenue() -> anyhow::Result<()> {
    let Some(db) = TestDatabase::connect().await else {
        return Ok(());
    };
    db.cleanup().await?;
    let services = ServiceFactory::new(db.pool.clone());

    let organizer_id = Uuid::new_v4();

    // Paid event: 2 confirmed at 1500 cents each
    let paid = published_paid_event(&services, organizer_id, 2, 1500).await?;
    services.ledger.register(paid.id, Uuid::new_v4()).await?;
    services.ledger.register(paid.id, Uuid::new_v4()).await?;
    let waitlisted = services.ledger.register(paid.id, Uuid::new_v4()).await?;
    assert_eq!(waitlisted.status, RsvpStatus::Waitlisted.as_str());

    // Free event: confirmed seats contribute no revenue
    let free = published_event(&services, organizer_id, 10).await?;
    let attendee = services.ledger.register(free.id, Uuid::new_v4()).await?;
    services
        .ledger
        .check_in(attendee.id, Uuid::new_v4(), CheckInMethod::Manual, None, None)
        .await?;

    // Another organizer's event must not leak into the totals
    let other = published_paid_event(&services, Uuid::new_v4(), 5, 9900).await?;
    services.ledger.register(other.id, Uuid::new_v4()).await?;

    let totals = services.stats.organizer_totals(organizer_id).await?;
    assert_eq!(totals.events, 2);
    assert_eq!(totals.confirmed, 3);
    assert_eq!(totals.waitlisted, 1);
    assert_eq!(totals.checked_in, 1);
    assert_eq!(totals.revenue_cents, 3000);

    Ok(())
}

/// The end-to-end scenario from the product brief: capacity 2, three
/// registrants, a cancellation with promotion, then one check-in.
#[tokio::test]
#[serial]
async fn test_capacity_two_scenario() -> anyhow::Result<()> {
    let Some(db) = TestDatabase::connect().await else {
        return Ok(());
    };
    db.cleanup().await?;
    let services = ServiceFactory::new(db.pool.clone());

    let event = published_event(&services, Uuid::new_v4(), 2).await?;
    let (u1, u2, u3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let r1 = services.ledger.register(event.id, u1).await?;
    let r2 = services.ledger.register(event.id, u2).await?;
    let r3 = services.ledger.register(event.id, u3).await?;
    assert_eq!(r1.status, RsvpStatus::Confirmed.as_str());
    assert_eq!(r2.status, RsvpStatus::Confirmed.as_str());
    assert_eq!(r3.status, RsvpStatus::Waitlisted.as_str());

    services.ledger.cancel(r1.id).await?;

    let confirmed_users: Vec<Uuid> = services
        .ledger
        .get_by_event(event.id)
        .await?
        .into_iter()
        .filter(|r| r.status == RsvpStatus::Confirmed.as_str())
        .map(|r| r.user_id)
        .collect();
    assert_eq!(confirmed_users.len(), 2);
    assert!(confirmed_users.contains(&u2));
    assert!(confirmed_users.contains(&u3));

    services
        .ledger
        .check_in(r2.id, Uuid::new_v4(), CheckInMethod::Qr, None, None)
        .await?;

    let records = services.attendance.list_by_event(event.id).await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, u2);

    let stats = services.stats.event_stats(event.id).await?;
    assert_eq!(stats.confirmed, 2);
    assert_eq!(stats.checked_in, 1);
    assert_eq!(stats.fill_rate, 1.0);

    Ok(())
}
