use models::{
    ids::Guid,
    interval::TimeRange,
    status::{LocationType, PaymentStatus, ReservationStatus},
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coaching_reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "session_id")]
    pub reservation_id: Guid,
    pub user_id: Guid,
    pub coach_id: Guid,
    pub session_date: Date,
    pub session_time: Time,
    pub duration_minutes: i32,
    pub location_type: LocationType,
    pub location_id: Option<Guid>,
    pub status: ReservationStatus,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub payment_status: PaymentStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// The calendar window this reservation occupies
    pub fn slot(&self) -> Option<TimeRange<DateTime>> {
        TimeRange::reservation_slot(
            self.session_date,
            self.session_time,
            i64::from(self.duration_minutes),
        )
        .ok()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_delete = "Restrict"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::coaches::Entity",
        from = "Column::CoachId",
        to = "super::coaches::Column::CoachId",
        on_delete = "Restrict"
    )]
    Coach,
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::LocationId",
        on_delete = "SetNull"
    )]
    Location,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::coaches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coach.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
