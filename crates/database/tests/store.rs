mod common;

use common::*;
use database::{
    Store, StoreConfig, StoreError,
    services::{AnnotationService, CoachService, ReservationService, UserService, VideoService},
};
use sea_orm::TransactionTrait;
use std::time::Duration;

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let store = store().await;
    store.migrate().await.unwrap();
    store.ping().await.unwrap();
}

#[tokio::test]
async fn test_connect_to_bad_url_fails_fast() {
    let mut config = StoreConfig::new("not-a-database://nowhere");
    config.connect_retries = 1;
    config.retry_backoff = Duration::from_millis(1);

    let err = Store::connect(&config).await.unwrap_err();
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_timed_out_write_leaves_no_row() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;

    // occupy the only pooled connection so the booking cannot make progress
    let held = store.connection().begin().await.unwrap();

    let impatient = store.with_deadline(Duration::from_millis(100));
    assert_eq!(impatient.deadline(), Duration::from_millis(100));
    let err = ReservationService::book(
        &impatient,
        reservation(u.user_id, c.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StoreError::Timeout(_)), "{err:?}");
    assert!(!err.is_recoverable());

    held.rollback().await.unwrap();

    let booked = ReservationService::list_for_coach_on(&store, c.coach_id, date("2024-06-01"))
        .await
        .unwrap();
    assert!(booked.is_empty());

    // the coach's calendar is not left locked by the abandoned attempt
    ReservationService::book(&store, reservation(u.user_id, c.coach_id, "2024-06-01", "10:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_timed_out_annotation_does_not_flip_review_flag() {
    let store = store().await;
    let fixture = review(&store).await;

    let held = store.connection().begin().await.unwrap();
    let err = AnnotationService::create_section_group(
        &store.with_deadline(Duration::from_millis(100)),
        fixture.video.video_id,
        fixture.session.session_id,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StoreError::Timeout(_)));
    held.rollback().await.unwrap();

    let clip = VideoService::get(&store, fixture.video.video_id).await.unwrap();
    assert!(!clip.is_reviewed);
    assert!(
        AnnotationService::list_groups_for_video(&store, fixture.video.video_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_uncommitted_work_is_rolled_back_on_drop() {
    let store = store().await;

    {
        let txn = store.connection().begin().await.unwrap();
        drop(txn);
    }

    // the pool hands the connection back in a usable state
    let created = user(&store, "after@example.com").await;
    assert_eq!(
        UserService::get(&store, created.user_id).await.unwrap(),
        created
    );
}

#[tokio::test]
async fn test_unset_references_read_back_as_none() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;

    let c = coach(&store, "c@example.com").await;
    assert_eq!(c.location_id, None);
    assert_eq!(CoachService::get(&store, c.coach_id).await.unwrap(), c);

    let clip = video(&store, u.user_id).await;
    assert_eq!(clip.section_group_id, None);
    assert_eq!(VideoService::get(&store, clip.video_id).await.unwrap(), clip);

    let booked = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap();
    assert_eq!(booked.location_id, None);
    assert_eq!(
        ReservationService::get(&store, booked.reservation_id)
            .await
            .unwrap(),
        booked
    );
}
