use models::ids::Guid;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coaches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub coach_id: Guid,
    pub coachname: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub hourly_rate: Option<Decimal>,
    pub location_id: Option<Guid>,
    pub rank: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::LocationId",
        on_delete = "SetNull"
    )]
    Location,
    #[sea_orm(has_many = "super::coaching_sessions::Entity")]
    CoachingSessions,
    #[sea_orm(has_many = "super::coaching_reservations::Entity")]
    CoachingReservations,
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::coaching_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingSessions.def()
    }
}

impl Related<super::coaching_reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingReservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
