use models::{annotation::SwingTags, ids::Guid, interval::TimeRange};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "swing_sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub section_id: Guid,
    pub section_group_id: Guid,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub start_sec: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub end_sec: Decimal,
    pub image_url: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub tags: SwingTags,
    #[sea_orm(column_type = "Json", nullable)]
    pub markup_json: Option<Json>,
    pub coach_comment: Option<String>,
    pub coach_comment_summary: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    pub fn range(&self) -> Option<TimeRange<Decimal>> {
        TimeRange::new(self.start_sec, self.end_sec).ok()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section_groups::Entity",
        from = "Column::SectionGroupId",
        to = "super::section_groups::Column::SectionGroupId",
        on_delete = "Cascade"
    )]
    SectionGroup,
}

impl Related<super::section_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
