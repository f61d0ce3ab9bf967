use super::consistency::{checked_email, require_coach, require_location, require_non_empty};
use crate::{db::Store, entities::coaches, error::StoreError};
use chrono::Utc;
use log::info;
use models::{
    booking::price_fits,
    ids::Guid,
    profile::{CoachPatch, NewCoach},
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct CoachService;

impl CoachService {
    pub async fn create(store: &Store, new: NewCoach) -> Result<coaches::Model, StoreError> {
        require_non_empty("coachname", &new.coachname)?;
        let email = checked_email(&new.email)?;
        check_rate(new.hourly_rate)?;

        store
            .run("create coach", async move {
                let txn = store.begin().await?;
                if Self::lookup_email(&txn, &email).await?.is_some() {
                    return Err(StoreError::Conflict(format!(
                        "email {email} is already registered"
                    )));
                }
                if let Some(location_id) = new.location_id {
                    require_location(&txn, location_id).await?;
                }

                let now = Utc::now();
                let coach = coaches::ActiveModel {
                    coach_id: Set(Guid::new()),
                    coachname: Set(new.coachname),
                    email: Set(email),
                    password_hash: Set(new.password_hash),
                    hourly_rate: Set(new.hourly_rate),
                    location_id: Set(new.location_id),
                    rank: Set(new.rank),
                    profile_picture_url: Set(new.profile_picture_url),
                    bio: Set(new.bio),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?;
                txn.commit().await?;

                info!("Created coach {}", coach.coach_id);
                Ok(coach)
            })
            .await
    }

    pub async fn get(store: &Store, coach_id: Guid) -> Result<coaches::Model, StoreError> {
        store
            .run("get coach", require_coach(store.connection(), coach_id))
            .await
    }

    pub async fn update(
        store: &Store,
        coach_id: Guid,
        patch: CoachPatch,
    ) -> Result<coaches::Model, StoreError> {
        let email = patch.email.as_deref().map(checked_email).transpose()?;
        if let Some(coachname) = &patch.coachname {
            require_non_empty("coachname", coachname)?;
        }
        check_rate(patch.hourly_rate)?;

        store
            .run("update coach", async move {
                let txn = store.begin().await?;
                let mut am: coaches::ActiveModel = require_coach(&txn, coach_id).await?.into();

                if let Some(email) = email {
                    if let Some(other) = Self::lookup_email(&txn, &email).await? {
                        if other.coach_id != coach_id {
                            return Err(StoreError::Conflict(format!(
                                "email {email} is already registered"
                            )));
                        }
                    }
                    am.email = Set(email);
                }
                if let Some(location_id) = patch.location_id {
                    require_location(&txn, location_id).await?;
                }

                apply_patch!(am, patch;
                    coachname, password_hash;
                    optional: hourly_rate, location_id, rank, profile_picture_url, bio,
                );
                am.updated_at = Set(Utc::now());

                let coach = am.update(&txn).await?;
                txn.commit().await?;

                info!("Updated coach {coach_id}");
                Ok(coach)
            })
            .await
    }

    /// Coaches anchored to a location, by name
    pub async fn list_by_location(
        store: &Store,
        location_id: Guid,
    ) -> Result<Vec<coaches::Model>, StoreError> {
        store
            .run("list coaches by location", async move {
                Ok(coaches::Entity::find()
                    .filter(coaches::Column::LocationId.eq(location_id))
                    .order_by_asc(coaches::Column::Coachname)
                    .all(store.connection())
                    .await?)
            })
            .await
    }

    async fn lookup_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<coaches::Model>, StoreError> {
        Ok(coaches::Entity::find()
            .filter(coaches::Column::Email.eq(email))
            .one(db)
            .await?)
    }
}

fn check_rate(rate: Option<Decimal>) -> Result<(), StoreError> {
    match rate {
        Some(rate) if !price_fits(rate) => Err(StoreError::Validation(format!(
            "hourly rate {rate} does not fit DECIMAL(10,2)"
        ))),
        _ => Ok(()),
    }
}
