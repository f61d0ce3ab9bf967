use sea_orm_migration::prelude::*;

use crate::m20250601_create_coaching_tables::{
    CoachingReservations, CoachingSessions, Coaches, SectionGroups, SwingSections, Videos,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on coaches.location_id for nulling out on location delete
        manager
            .create_index(
                Index::create()
                    .name("idx_coaches_location_id")
                    .table(Coaches::Table)
                    .col(Coaches::LocationId)
                    .to_owned(),
            )
            .await?;

        // A user's library is listed pinned first, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_videos_user_id")
                    .table(Videos::Table)
                    .col(Videos::UserId)
                    .col(Videos::IsPinned)
                    .col(Videos::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coaching_sessions_coach_id_status")
                    .table(CoachingSessions::Table)
                    .col(CoachingSessions::CoachId)
                    .col(CoachingSessions::SessionStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coaching_sessions_user_id")
                    .table(CoachingSessions::Table)
                    .col(CoachingSessions::UserId)
                    .to_owned(),
            )
            .await?;

        // Conflict check reads a coach's booked slots around one date
        manager
            .create_index(
                Index::create()
                    .name("idx_coaching_reservations_coach_date")
                    .table(CoachingReservations::Table)
                    .col(CoachingReservations::CoachId)
                    .col(CoachingReservations::SessionDate)
                    .col(CoachingReservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coaching_reservations_user_id")
                    .table(CoachingReservations::Table)
                    .col(CoachingReservations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coaching_reservations_location_id")
                    .table(CoachingReservations::Table)
                    .col(CoachingReservations::LocationId)
                    .to_owned(),
            )
            .await?;

        // One annotation pass per (video, session)
        manager
            .create_index(
                Index::create()
                    .name("idx_section_groups_video_session")
                    .table(SectionGroups::Table)
                    .col(SectionGroups::VideoId)
                    .col(SectionGroups::SessionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Sections are read back ORDER BY start_sec
        manager
            .create_index(
                Index::create()
                    .name("idx_swing_sections_group_start")
                    .table(SwingSections::Table)
                    .col(SwingSections::SectionGroupId)
                    .col(SwingSections::StartSec)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_swing_sections_group_start", SwingSections::Table.into_table_ref()),
            ("idx_section_groups_video_session", SectionGroups::Table.into_table_ref()),
            (
                "idx_coaching_reservations_location_id",
                CoachingReservations::Table.into_table_ref(),
            ),
            (
                "idx_coaching_reservations_user_id",
                CoachingReservations::Table.into_table_ref(),
            ),
            (
                "idx_coaching_reservations_coach_date",
                CoachingReservations::Table.into_table_ref(),
            ),
            ("idx_coaching_sessions_user_id", CoachingSessions::Table.into_table_ref()),
            (
                "idx_coaching_sessions_coach_id_status",
                CoachingSessions::Table.into_table_ref(),
            ),
            ("idx_videos_user_id", Videos::Table.into_table_ref()),
            ("idx_coaches_location_id", Coaches::Table.into_table_ref()),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }

        Ok(())
    }
}
