use models::ids::Guid;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Guid,
    pub usertype: String,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String, // stored lower-cased
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub gender: Option<String>,
    #[sea_orm(unique)]
    pub line_user_id: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub birthday: Option<Date>,
    pub golf_score_ave: Option<i32>,
    pub golf_exp: Option<i32>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub sport_exp: Option<String>,
    pub industry: Option<String>,
    pub job_title: Option<String>,
    pub position: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::videos::Entity")]
    Videos,
    #[sea_orm(has_many = "super::coaching_sessions::Entity")]
    CoachingSessions,
    #[sea_orm(has_many = "super::coaching_reservations::Entity")]
    CoachingReservations,
}

impl Related<super::videos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Videos.def()
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
