use super::consistency::{require_location, require_non_empty};
use crate::{
    db::Store,
    entities::{coaches, coaching_reservations, locations},
    error::StoreError,
};
use chrono::Utc;
use log::info;
use models::{
    ids::Guid,
    profile::{LocationPatch, NewLocation},
    status::ReservationStatus,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};

pub struct LocationService;

impl LocationService {
    pub async fn create(store: &Store, new: NewLocation) -> Result<locations::Model, StoreError> {
        require_non_empty("name", &new.name)?;
        require_non_empty("address", &new.address)?;
        check_capacity(new.capacity)?;

        store
            .run("create location", async move {
                let now = Utc::now();
                let location = locations::ActiveModel {
                    location_id: Set(Guid::new()),
                    name: Set(new.name),
                    address: Set(new.address),
                    capacity: Set(new.capacity),
                    image_url: Set(new.image_url),
                    video_url: Set(new.video_url),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(store.connection())
                .await?;

                info!("Created location {} ({})", location.location_id, location.name);
                Ok(location)
            })
            .await
    }

    pub async fn get(store: &Store, location_id: Guid) -> Result<locations::Model, StoreError> {
        store
            .run("get location", require_location(store.connection(), location_id))
            .await
    }

    pub async fn update(
        store: &Store,
        location_id: Guid,
        patch: LocationPatch,
    ) -> Result<locations::Model, StoreError> {
        if let Some(capacity) = patch.capacity {
            check_capacity(capacity)?;
        }

        store
            .run("update location", async move {
                let db = store.connection();
                let mut am: locations::ActiveModel =
                    require_location(db, location_id).await?.into();

                apply_patch!(am, patch;
                    name, address, capacity;
                    optional: image_url, video_url,
                );
                am.updated_at = Set(Utc::now());

                Ok(am.update(db).await?)
            })
            .await
    }

    pub async fn list(store: &Store) -> Result<Vec<locations::Model>, StoreError> {
        store
            .run("list locations", async move {
                Ok(locations::Entity::find()
                    .order_by_asc(locations::Column::Name)
                    .all(store.connection())
                    .await?)
            })
            .await
    }

    /// Deletes a location no booked reservation still points at.
    ///
    /// Coaches and finished reservations referencing it keep their rows with `location_id` cleared.
    pub async fn delete(store: &Store, location_id: Guid) -> Result<(), StoreError> {
        store
            .run("delete location", async move {
                let txn = store.begin().await?;
                let location = require_location(&txn, location_id).await?;

                let booked = coaching_reservations::Entity::find()
                    .filter(coaching_reservations::Column::LocationId.eq(location_id))
                    .filter(coaching_reservations::Column::Status.eq(ReservationStatus::Booked))
                    .count(&txn)
                    .await?;
                if booked > 0 {
                    return Err(StoreError::Precondition(format!(
                        "location {location_id} still has {booked} booked reservation(s)"
                    )));
                }

                let now = Utc::now();
                let coaches = coaches::Entity::update_many()
                    .col_expr(coaches::Column::LocationId, Expr::value(Option::<Guid>::None))
                    .col_expr(coaches::Column::UpdatedAt, Expr::value(now))
                    .filter(coaches::Column::LocationId.eq(location_id))
                    .exec(&txn)
                    .await?;
                coaching_reservations::Entity::update_many()
                    .col_expr(
                        coaching_reservations::Column::LocationId,
                        Expr::value(Option::<Guid>::None),
                    )
                    .col_expr(coaching_reservations::Column::UpdatedAt, Expr::value(now))
                    .filter(coaching_reservations::Column::LocationId.eq(location_id))
                    .exec(&txn)
                    .await?;

                location.delete(&txn).await?;
                txn.commit().await?;

                info!(
                    "Deleted location {location_id}, detached {} coach(es)",
                    coaches.rows_affected
                );
                Ok(())
            })
            .await
    }
}

fn check_capacity(capacity: i32) -> Result<(), StoreError> {
    if capacity < 1 {
        return Err(StoreError::Validation(format!(
            "capacity must be positive, got {capacity}"
        )));
    }
    Ok(())
}
