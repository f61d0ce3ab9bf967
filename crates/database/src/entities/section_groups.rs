use models::ids::Guid;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One annotation pass over a video within a coaching session
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "section_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub section_group_id: Guid,
    pub video_id: Guid,
    pub session_id: Guid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::videos::Entity",
        from = "Column::VideoId",
        to = "super::videos::Column::VideoId",
        on_delete = "Cascade"
    )]
    Video,
    #[sea_orm(
        belongs_to = "super::coaching_sessions::Entity",
        from = "Column::SessionId",
        to = "super::coaching_sessions::Column::SessionId",
        on_delete = "Cascade"
    )]
    CoachingSession,
    #[sea_orm(has_many = "super::swing_sections::Entity")]
    SwingSections,
}

impl Related<super::videos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
}

impl Related<super::coaching_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingSession.def()
    }
}

impl Related<super::swing_sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SwingSections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
