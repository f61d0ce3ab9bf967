use models::ids::Guid;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub video_id: Guid,
    pub user_id: Guid,
    #[sea_orm(column_type = "Text")]
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub club_type: Option<String>,
    pub swing_form: Option<String>,
    pub swing_note: Option<String>,
    /// The newest annotation pass over this video, if any
    pub section_group_id: Option<Guid>,
    pub is_pinned: bool,
    pub is_reviewed: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::coaching_sessions::Entity")]
    CoachingSessions,
    #[sea_orm(has_many = "super::section_groups::Entity")]
    SectionGroups,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::coaching_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingSessions.def()
    }
}

impl Related<super::section_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
