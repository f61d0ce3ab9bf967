use models::ids::Guid;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub location_id: Guid,
    pub name: String,
    pub address: String,
    pub capacity: i32,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coaches::Entity")]
    Coaches,
    #[sea_orm(has_many = "super::coaching_reservations::Entity")]
    CoachingReservations,
}

impl Related<super::coaches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coaches.def()
    }
}

impl Related<super::coaching_reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingReservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
