use models::{ids::Guid, status::SessionStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coaching_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: Guid,
    pub video_id: Guid,
    pub user_id: Guid,
    pub coach_id: Guid,
    pub session_status: SessionStatus,
    pub requested_at: DateTimeUtc,
    /// Set exactly when the status is `completed`
    pub completed_at: Option<DateTimeUtc>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::videos::Entity",
        from = "Column::VideoId",
        to = "super::videos::Column::VideoId",
        on_delete = "Restrict"
    )]
    Video,
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
    #[sea_orm(has_many = "super::section_groups::Entity")]
    SectionGroups,
}

impl Related<super::videos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
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

impl Related<super::section_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
