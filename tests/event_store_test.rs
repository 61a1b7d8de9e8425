//! Integration tests for the event record store: lifecycle transitions and
//! capacity updates.

mod helpers;

use assert_matches::assert_matches;
use helpers::database_helper::TestDatabase;
use helpers::test_data::{free_event_request, published_event};
use schedula::models::event::EventStatus;
use schedula::services::ServiceFactory;
use schedula::SchedulaError;
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_event_lifecycle() -> anyhow::Result<()> {
    let Some(db) = TestDatabase::connect().await else {
        return Ok(());
    };
    db.cleanup().await?;
    let services = ServiceFactory::new(db.pool.clone());

    let event = services
        .events
        .create_event(free_event_request(Uuid::new_v4(), 10))
        .await?;
    assert_eq!(event.status, EventStatus::Draft.as_str());

    let published = services.events.publish(event.id).await?;
    assert_eq!(published.status, EventStatus::Published.as_str());

    let completed = services.events.complete(event.id).await?;
    assert_eq!(completed.status, EventStatus::Completed.as_str());

    // Completed is terminal
    let err = services.events.cancel(event.id).await.unwrap_err();
    assert_matches!(err, SchedulaError::InvalidStateTransition { .. });

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_illegal_transitions_rejected() -> anyhow::Result<()> {
    let Some(db) = TestDatabase::connect().await else {
        return Ok(());
    };
    db.cleanup().await?;
    let services = ServiceFactory::new(db.pool.clone());

    let draft = services
        .events
        .create_event(free_event_request(Uuid::new_v4(), 10))
        .await?;

    // draft -> completed skips publication
    let err = services.events.complete(draft.id).await.unwrap_err();
    assert_matches!(
        err,
        SchedulaError::InvalidStateTransition { ref from, ref to }
            if from == "draft" && to == "completed"
    );

    // cancelled is terminal
    services.events.cancel(draft.id).await?;
    let err = services.events.publish(draft.id).await.unwrap_err();
    assert_matches!(err, SchedulaError::InvalidStateTransition { .. });

    let err = services.events.publish(Uuid::new_v4()).await.unwrap_err();
    assert_matches!(err, SchedulaError::EventNotFound { .. });

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_capacity_cannot_drop_below_confirmed() -> anyhow::Result<()> {
    let Some(db) = TestDatabase::connect().await else {
        return Ok(());
    };
    db.cleanup().await?;
    let services = ServiceFactory::new(db.pool.clone());

    let event = published_event(&services, Uuid::new_v4(), 5).await?;
    for _ in 0..3 {
        services.ledger.register(event.id, Uuid::new_v4()).await?;
    }

    let err = services.events.update_capacity(event.id, 2).await.unwrap_err();
    assert_matches!(
        err,
        SchedulaError::CapacityBelowConfirmed { requested: 2, confirmed: 3, .. }
    );

    // Shrinking down to the confirmed count is allowed, as is growing
    let shrunk = services.events.update_capacity(event.id, 3).await?;
    assert_eq!(shrunk.capacity, 3);
    let grown = services.events.update_capacity(event.id, 50).await?;
    assert_eq!(grown.capacity, 50);

    let err = services.events.update_capacity(event.id, -1).await.unwrap_err();
    assert_matches!(err, SchedulaError::InvalidInput(_));

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_create_event_validation() -> anyhow::Result<()> {
    let Some(db) = TestDatabase::connect().await else {
        return Ok(());
    };
    db.cleanup().await?;
    let services = ServiceFactory::new(db.pool.clone());

    let mut request = free_event_request(Uuid::new_v4(), 10);
    request.capacity = -5;
    let err = services.events.create_event(request).await.unwrap_err();
    assert_matches!(err, SchedulaError::InvalidInput(_));

    let mut request = free_event_request(Uuid::new_v4(), 10);
    request.ends_at = request.starts_at;
    let err = services.events.create_event(request).await.unwrap_err();
    assert_matches!(err, SchedulaError::InvalidInput(_));

    Ok(())
}
