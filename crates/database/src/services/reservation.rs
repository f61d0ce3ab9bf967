use super::consistency::{coach_scope, require_coach, require_location, require_user};
use crate::{db::Store, entities::coaching_reservations, error::StoreError};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use models::{
    booking::{NewReservation, price_fits},
    ids::Guid,
    interval::TimeRange,
    status::{PaymentStatus, ReservationStatus},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

pub struct ReservationService;

impl ReservationService {
    /// Books a coach for a calendar slot.
    ///
    /// The overlap check and the insert run under an exclusive lock on the coach, so two
    /// overlapping bookings racing each other cannot both commit.
    pub async fn book(
        store: &Store,
        new: NewReservation,
    ) -> Result<coaching_reservations::Model, StoreError> {
        let minutes = new
            .duration_minutes
            .unwrap_or_else(|| store.reservation_minutes());
        let slot = TimeRange::reservation_slot(new.session_date, new.session_time, minutes)?;
        let (from, to) = slot.candidate_dates()?;
        let duration_minutes = i32::try_from(minutes)
            .map_err(|_| StoreError::Validation(format!("duration {minutes} is out of range")))?;
        if !price_fits(new.price) {
            return Err(StoreError::Validation(format!(
                "price {} does not fit DECIMAL(10,2)",
                new.price
            )));
        }

        store
            .run("book reservation", async move {
                let guarded = store.begin_guarded(&coach_scope(new.coach_id)).await?;
                let txn = guarded.conn();

                require_user(txn, new.user_id).await?;
                require_coach(txn, new.coach_id).await?;
                if let Some(location_id) = new.location_id {
                    require_location(txn, location_id).await?;
                }

                let booked = coaching_reservations::Entity::find()
                    .filter(coaching_reservations::Column::CoachId.eq(new.coach_id))
                    .filter(coaching_reservations::Column::Status.eq(ReservationStatus::Booked))
                    .filter(coaching_reservations::Column::SessionDate.between(from, to))
                    .all(txn)
                    .await?;

                let existing = booked
                    .iter()
                    .filter_map(|r| r.slot().map(|s| (r.reservation_id, s)));
                if let Some(clash) = slot.first_overlap(existing) {
                    warn!(
                        "Coach {} already booked at {} by reservation {clash}",
                        new.coach_id,
                        slot.start()
                    );
                    return Err(StoreError::Overlap(format!(
                        "coach {} is already booked at {} (reservation {clash})",
                        new.coach_id,
                        slot.start()
                    )));
                }

                let now = Utc::now();
                let reservation = coaching_reservations::ActiveModel {
                    reservation_id: Set(Guid::new()),
                    user_id: Set(new.user_id),
                    coach_id: Set(new.coach_id),
                    session_date: Set(new.session_date),
                    session_time: Set(new.session_time),
                    duration_minutes: Set(duration_minutes),
                    location_type: Set(new.location_type),
                    location_id: Set(new.location_id),
                    status: Set(ReservationStatus::Booked),
                    price: Set(new.price),
                    payment_status: Set(PaymentStatus::Pending),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?;
                guarded.commit().await?;

                info!(
                    "Booked reservation {} for coach {} at {}",
                    reservation.reservation_id,
                    new.coach_id,
                    slot.start()
                );
                Ok(reservation)
            })
            .await
    }

    pub async fn get(
        store: &Store,
        reservation_id: Guid,
    ) -> Result<coaching_reservations::Model, StoreError> {
        store
            .run("get reservation", Self::find(store.connection(), reservation_id))
            .await
    }

    /// A coach's reservations on one day, in time order
    pub async fn list_for_coach_on(
        store: &Store,
        coach_id: Guid,
        date: NaiveDate,
    ) -> Result<Vec<coaching_reservations::Model>, StoreError> {
        store
            .run("list coach reservations", async move {
                Ok(coaching_reservations::Entity::find()
                    .filter(coaching_reservations::Column::CoachId.eq(coach_id))
                    .filter(coaching_reservations::Column::SessionDate.eq(date))
                    .order_by_asc(coaching_reservations::Column::SessionTime)
                    .all(store.connection())
                    .await?)
            })
            .await
    }

    /// A user's reservations, latest slot first
    pub async fn list_for_user(
        store: &Store,
        user_id: Guid,
    ) -> Result<Vec<coaching_reservations::Model>, StoreError> {
        store
            .run("list user reservations", async move {
                Ok(coaching_reservations::Entity::find()
                    .filter(coaching_reservations::Column::UserId.eq(user_id))
                    .order_by_desc(coaching_reservations::Column::SessionDate)
                    .order_by_desc(coaching_reservations::Column::SessionTime)
                    .all(store.connection())
                    .await?)
            })
            .await
    }

    pub async fn complete(
        store: &Store,
        reservation_id: Guid,
    ) -> Result<coaching_reservations::Model, StoreError> {
        Self::set_status(store, reservation_id, ReservationStatus::Completed).await
    }

    /// Cancels a booked reservation. Payment status is left as it is.
    pub async fn cancel(
        store: &Store,
        reservation_id: Guid,
    ) -> Result<coaching_reservations::Model, StoreError> {
        Self::set_status(store, reservation_id, ReservationStatus::Cancelled).await
    }

    pub async fn mark_paid(
        store: &Store,
        reservation_id: Guid,
    ) -> Result<coaching_reservations::Model, StoreError> {
        Self::set_payment_status(store, reservation_id, PaymentStatus::Paid).await
    }

    /// Moves the payment status to `next`; only `pending -> paid` is legal
    pub async fn set_payment_status(
        store: &Store,
        reservation_id: Guid,
        next: PaymentStatus,
    ) -> Result<coaching_reservations::Model, StoreError> {
        store
            .run("set payment status", async move {
                let db = store.connection();
                loop {
                    let current = Self::find(db, reservation_id).await?;
                    current.payment_status.transition(next)?;

                    let result = coaching_reservations::Entity::update_many()
                        .col_expr(coaching_reservations::Column::PaymentStatus, Expr::value(next))
                        .col_expr(coaching_reservations::Column::UpdatedAt, Expr::value(Utc::now()))
                        .filter(coaching_reservations::Column::ReservationId.eq(reservation_id))
                        .filter(
                            coaching_reservations::Column::PaymentStatus.eq(current.payment_status),
                        )
                        .exec(db)
                        .await?;

                    if result.rows_affected == 1 {
                        info!("Reservation {reservation_id} payment: {}", next.as_str());
                        return Self::find(db, reservation_id).await;
                    }

                    debug!("Reservation {reservation_id} payment changed concurrently, re-reading");
                }
            })
            .await
    }

    async fn set_status(
        store: &Store,
        reservation_id: Guid,
        next: ReservationStatus,
    ) -> Result<coaching_reservations::Model, StoreError> {
        store
            .run("set reservation status", async move {
                let db = store.connection();
                loop {
                    let current = Self::find(db, reservation_id).await?;
                    current.status.transition(next)?;

                    let result = coaching_reservations::Entity::update_many()
                        .col_expr(coaching_reservations::Column::Status, Expr::value(next))
                        .col_expr(coaching_reservations::Column::UpdatedAt, Expr::value(Utc::now()))
                        .filter(coaching_reservations::Column::ReservationId.eq(reservation_id))
                        .filter(coaching_reservations::Column::Status.eq(current.status))
                        .exec(db)
                        .await?;

                    if result.rows_affected == 1 {
                        info!(
                            "Reservation {reservation_id}: {} -> {}",
                            current.status.as_str(),
                            next.as_str()
                        );
                        return Self::find(db, reservation_id).await;
                    }

                    debug!("Reservation {reservation_id} changed concurrently, re-reading");
                }
            })
            .await
    }

    async fn find<C: ConnectionTrait>(
        db: &C,
        reservation_id: Guid,
    ) -> Result<coaching_reservations::Model, StoreError> {
        coaching_reservations::Entity::find_by_id(reservation_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("reservation", reservation_id))
    }
}
