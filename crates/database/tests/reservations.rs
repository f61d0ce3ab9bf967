mod common;

use chrono::NaiveDate;
use common::*;
use database::{StoreError, services::ReservationService};
use futures::future::join_all;
use models::{
    ids::Guid,
    status::{LocationType, PaymentStatus, ReservationStatus},
};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_half_hour_later_overlaps_but_adjacent_slot_does_not() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;

    let r1 = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap();
    assert_eq!(r1.status, ReservationStatus::Booked);
    assert_eq!(r1.payment_status, PaymentStatus::Pending);
    assert_eq!(r1.duration_minutes, 60);

    let r2 = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "10:30"),
    )
    .await;
    assert!(matches!(r2, Err(StoreError::Overlap(_))), "{r2:?}");

    let r3 = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "11:00"),
    )
    .await;
    assert!(r3.is_ok());

    let day = ReservationService::list_for_coach_on(&store, c.coach_id, date("2024-06-01"))
        .await
        .unwrap();
    assert_eq!(day.len(), 2);
    assert_eq!(day[0].reservation_id, r1.reservation_id);
}

#[tokio::test]
async fn test_round_trip() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;
    let range = location(&store, "Course").await;

    let mut new = reservation(u.user_id, c.coach_id, "2024-06-01", "09:15");
    new.location_type = LocationType::RealGolfCourse;
    new.location_id = Some(range.location_id);
    new.price = Decimal::new(1550050, 2);
    let booked = ReservationService::book(&store, new).await.unwrap();

    let fetched = ReservationService::get(&store, booked.reservation_id)
        .await
        .unwrap();
    assert_eq!(fetched, booked);
    assert_eq!(fetched.location_type, LocationType::RealGolfCourse);
    assert_eq!(fetched.price, Decimal::new(1550050, 2));
    assert_eq!(fetched.session_time, time("09:15"));
}

#[tokio::test]
async fn test_other_coaches_and_cancelled_slots_do_not_conflict() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c1 = coach(&store, "c1@example.com").await;
    let c2 = coach(&store, "c2@example.com").await;

    let first = ReservationService::book(
        &store,
        reservation(u.user_id, c1.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap();
    ReservationService::book(&store, reservation(u.user_id, c2.coach_id, "2024-06-01", "10:00"))
        .await
        .unwrap();

    ReservationService::cancel(&store, first.reservation_id)
        .await
        .unwrap();
    ReservationService::book(&store, reservation(u.user_id, c1.coach_id, "2024-06-01", "10:30"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_overlap_across_midnight() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;

    ReservationService::book(&store, reservation(u.user_id, c.coach_id, "2024-06-01", "23:30"))
        .await
        .unwrap();

    let mut early = reservation(u.user_id, c.coach_id, "2024-06-02", "00:15");
    early.duration_minutes = Some(30);
    let err = ReservationService::book(&store, early).await.unwrap_err();
    assert!(matches!(err, StoreError::Overlap(_)));

    let mut later = reservation(u.user_id, c.coach_id, "2024-06-02", "00:30");
    later.duration_minutes = Some(30);
    ReservationService::book(&store, later).await.unwrap();
}

#[tokio::test]
async fn test_explicit_duration_widens_the_window() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;

    let mut long = reservation(u.user_id, c.coach_id, "2024-06-01", "12:00");
    long.duration_minutes = Some(90);
    let long = ReservationService::book(&store, long).await.unwrap();
    assert_eq!(long.duration_minutes, 90);

    let err = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "13:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StoreError::Overlap(_)));

    ReservationService::book(&store, reservation(u.user_id, c.coach_id, "2024-06-01", "13:30"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_bookings_are_rejected() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;

    let err = ReservationService::book(
        &store,
        reservation(Guid::new(), c.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "user", .. }));

    let err = ReservationService::book(
        &store,
        reservation(u.user_id, Guid::new(), "2024-06-01", "10:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "coach", .. }));

    let mut unknown_location = reservation(u.user_id, c.coach_id, "2024-06-01", "10:00");
    unknown_location.location_id = Some(Guid::new());
    let err = ReservationService::book(&store, unknown_location)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "location", .. }));

    let mut zero = reservation(u.user_id, c.coach_id, "2024-06-01", "10:00");
    zero.duration_minutes = Some(0);
    let err = ReservationService::book(&store, zero).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let mut pricey = reservation(u.user_id, c.coach_id, "2024-06-01", "10:00");
    pricey.price = Decimal::new(1001, 3);
    let err = ReservationService::book(&store, pricey).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let mut last_day = reservation(u.user_id, c.coach_id, "2024-06-01", "23:30");
    last_day.session_date = NaiveDate::MAX;
    let err = ReservationService::book(&store, last_day)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)), "{err:?}");

    let day = ReservationService::list_for_coach_on(&store, c.coach_id, date("2024-06-01"))
        .await
        .unwrap();
    assert!(day.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_overlapping_bookings_admit_exactly_one() {
    let (_dir, store) = shared_store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;

    // every start lies within the same hour, so any two of these windows overlap
    let attempts = ["10:00", "10:10", "10:20", "10:30", "10:40", "10:50", "10:00", "10:59"]
        .into_iter()
        .map(|at| {
            let store = store.clone();
            let new = reservation(u.user_id, c.coach_id, "2024-06-01", at);
            tokio::spawn(async move { ReservationService::book(&store, new).await })
        });

    let outcomes: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(StoreError::Overlap(_))))
    );

    let booked = ReservationService::list_for_coach_on(&store, c.coach_id, date("2024-06-01"))
        .await
        .unwrap();
    assert_eq!(booked.len(), 1);
}

#[tokio::test]
async fn test_payment_only_moves_forward() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;
    let booked = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap();
    let id = booked.reservation_id;

    let paid = ReservationService::mark_paid(&store, id).await.unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    let err = ReservationService::set_payment_status(&store, id, PaymentStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition(_)));
    let err = ReservationService::mark_paid(&store, id).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition(_)));

    assert_eq!(
        ReservationService::get(&store, id).await.unwrap().payment_status,
        PaymentStatus::Paid
    );
}

#[tokio::test]
async fn test_cancelling_paid_reservation_keeps_payment() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;
    let booked = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap();

    ReservationService::mark_paid(&store, booked.reservation_id)
        .await
        .unwrap();
    let cancelled = ReservationService::cancel(&store, booked.reservation_id)
        .await
        .unwrap();

    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_terminal_reservations_stay_terminal() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;
    let booked = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap();

    ReservationService::complete(&store, booked.reservation_id)
        .await
        .unwrap();

    let err = ReservationService::cancel(&store, booked.reservation_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition(_)));
    let err = ReservationService::complete(&store, booked.reservation_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition(_)));

    // a completed slot no longer blocks the calendar
    ReservationService::book(&store, reservation(u.user_id, c.coach_id, "2024-06-01", "10:30"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_for_user_latest_first() {
    let store = store().await;
    let u = user(&store, "u@example.com").await;
    let c = coach(&store, "c@example.com").await;

    let june = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-06-01", "10:00"),
    )
    .await
    .unwrap();
    let july = ReservationService::book(
        &store,
        reservation(u.user_id, c.coach_id, "2024-07-01", "08:00"),
    )
    .await
    .unwrap();

    let ids: Vec<_> = ReservationService::list_for_user(&store, u.user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.reservation_id)
        .collect();
    assert_eq!(ids, vec![july.reservation_id, june.reservation_id]);
}
