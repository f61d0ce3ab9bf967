use sea_orm_migration::{prelude::*, sea_orm::DbBackend};

use crate::m20250601_create_coaching_tables::{SectionGroups, Videos};

const FK_NAME: &str = "fk-videos-section_group_id";

/// videos and section_groups reference each other, so this foreign key can only be
/// added after both tables exist. SQLite cannot add constraints to an existing table;
/// there the link is maintained by the annotation service alone.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() == DbBackend::Sqlite {
            return Ok(());
        }

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_NAME)
                    .from(Videos::Table, Videos::SectionGroupId)
                    .to(SectionGroups::Table, SectionGroups::SectionGroupId)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() == DbBackend::Sqlite {
            return Ok(());
        }

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_NAME)
                    .table(Videos::Table)
                    .to_owned(),
            )
            .await
    }
}
