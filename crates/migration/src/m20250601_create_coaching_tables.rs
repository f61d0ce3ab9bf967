use sea_orm_migration::prelude::*;

/// Width of every textual identifier column
const ID_LEN: u32 = 36;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).char_len(ID_LEN).not_null().to_owned()
}

fn created_at_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create locations table
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(id_col(Locations::LocationId).primary_key())
                    .col(ColumnDef::new(Locations::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Locations::Address).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Locations::Capacity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Locations::ImageUrl).text())
                    .col(ColumnDef::new(Locations::VideoUrl).text())
                    .col(created_at_col(Locations::CreatedAt))
                    .col(created_at_col(Locations::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::UserId).primary_key())
                    .col(
                        ColumnDef::new(Users::Usertype)
                            .string_len(50)
                            .not_null()
                            .default("user"),
                    )
                    .col(ColumnDef::new(Users::Username).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Users::Gender).string_len(10))
                    .col(ColumnDef::new(Users::LineUserId).string_len(255).unique_key())
                    .col(ColumnDef::new(Users::ProfilePictureUrl).text())
                    .col(ColumnDef::new(Users::Bio).text())
                    .col(ColumnDef::new(Users::Birthday).date())
                    .col(ColumnDef::new(Users::GolfScoreAve).integer())
                    .col(ColumnDef::new(Users::GolfExp).integer())
                    .col(ColumnDef::new(Users::ZipCode).string_len(10))
                    .col(ColumnDef::new(Users::State).string_len(50))
                    .col(ColumnDef::new(Users::Address1).string_len(255))
                    .col(ColumnDef::new(Users::Address2).string_len(255))
                    .col(ColumnDef::new(Users::SportExp).string_len(100))
                    .col(ColumnDef::new(Users::Industry).string_len(100))
                    .col(ColumnDef::new(Users::JobTitle).string_len(100))
                    .col(ColumnDef::new(Users::Position).string_len(100))
                    .col(created_at_col(Users::CreatedAt))
                    .col(created_at_col(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create coaches table
        manager
            .create_table(
                Table::create()
                    .table(Coaches::Table)
                    .if_not_exists()
                    .col(id_col(Coaches::CoachId).primary_key())
                    .col(ColumnDef::new(Coaches::Coachname).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Coaches::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Coaches::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Coaches::HourlyRate).decimal_len(10, 2))
                    .col(ColumnDef::new(Coaches::LocationId).char_len(ID_LEN))
                    .col(ColumnDef::new(Coaches::Rank).string_len(50))
                    .col(ColumnDef::new(Coaches::ProfilePictureUrl).text())
                    .col(ColumnDef::new(Coaches::Bio).text())
                    .col(created_at_col(Coaches::CreatedAt))
                    .col(created_at_col(Coaches::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coaches-location_id")
                            .from(Coaches::Table, Coaches::LocationId)
                            .to(Locations::Table, Locations::LocationId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create videos table; the link to section_groups is added once that table exists
        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(id_col(Videos::VideoId).primary_key())
                    .col(id_col(Videos::UserId))
                    .col(ColumnDef::new(Videos::VideoUrl).text().not_null())
                    .col(ColumnDef::new(Videos::ThumbnailUrl).text())
                    .col(ColumnDef::new(Videos::ClubType).string_len(50))
                    .col(ColumnDef::new(Videos::SwingForm).string_len(50))
                    .col(ColumnDef::new(Videos::SwingNote).text())
                    .col(ColumnDef::new(Videos::SectionGroupId).char_len(ID_LEN))
                    .col(
                        ColumnDef::new(Videos::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Videos::IsReviewed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at_col(Videos::CreatedAt))
                    .col(created_at_col(Videos::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-videos-user_id")
                            .from(Videos::Table, Videos::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create coaching_sessions table
        manager
            .create_table(
                Table::create()
                    .table(CoachingSessions::Table)
                    .if_not_exists()
                    .col(id_col(CoachingSessions::SessionId).primary_key())
                    .col(id_col(CoachingSessions::VideoId))
                    .col(id_col(CoachingSessions::UserId))
                    .col(id_col(CoachingSessions::CoachId))
                    .col(
                        ColumnDef::new(CoachingSessions::SessionStatus)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(created_at_col(CoachingSessions::RequestedAt))
                    .col(ColumnDef::new(CoachingSessions::CompletedAt).timestamp_with_time_zone())
                    .col(created_at_col(CoachingSessions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coaching_sessions-video_id")
                            .from(CoachingSessions::Table, CoachingSessions::VideoId)
                            .to(Videos::Table, Videos::VideoId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coaching_sessions-user_id")
                            .from(CoachingSessions::Table, CoachingSessions::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coaching_sessions-coach_id")
                            .from(CoachingSessions::Table, CoachingSessions::CoachId)
                            .to(Coaches::Table, Coaches::CoachId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create coaching_reservations table
        manager
            .create_table(
                Table::create()
                    .table(CoachingReservations::Table)
                    .if_not_exists()
                    .col(id_col(CoachingReservations::SessionId).primary_key())
                    .col(id_col(CoachingReservations::UserId))
                    .col(id_col(CoachingReservations::CoachId))
                    .col(
                        ColumnDef::new(CoachingReservations::SessionDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoachingReservations::SessionTime)
                            .time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoachingReservations::DurationMinutes)
                            .integer()
                            .not_null()
                            .default(60),
                    )
                    .col(
                        ColumnDef::new(CoachingReservations::LocationType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CoachingReservations::LocationId).char_len(ID_LEN))
                    .col(
                        ColumnDef::new(CoachingReservations::Status)
                            .string_len(32)
                            .not_null()
                            .default("booked"),
                    )
                    .col(
                        ColumnDef::new(CoachingReservations::Price)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoachingReservations::PaymentStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(created_at_col(CoachingReservations::CreatedAt))
                    .col(created_at_col(CoachingReservations::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coaching_reservations-user_id")
                            .from(CoachingReservations::Table, CoachingReservations::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coaching_reservations-coach_id")
                            .from(CoachingReservations::Table, CoachingReservations::CoachId)
                            .to(Coaches::Table, Coaches::CoachId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coaching_reservations-location_id")
                            .from(CoachingReservations::Table, CoachingReservations::LocationId)
                            .to(Locations::Table, Locations::LocationId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create section_groups table
        manager
            .create_table(
                Table::create()
                    .table(SectionGroups::Table)
                    .if_not_exists()
                    .col(id_col(SectionGroups::SectionGroupId).primary_key())
                    .col(id_col(SectionGroups::VideoId))
                    .col(id_col(SectionGroups::SessionId))
                    .col(created_at_col(SectionGroups::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-section_groups-video_id")
                            .from(SectionGroups::Table, SectionGroups::VideoId)
                            .to(Videos::Table, Videos::VideoId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-section_groups-session_id")
                            .from(SectionGroups::Table, SectionGroups::SessionId)
                            .to(CoachingSessions::Table, CoachingSessions::SessionId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create swing_sections table
        manager
            .create_table(
                Table::create()
                    .table(SwingSections::Table)
                    .if_not_exists()
                    .col(id_col(SwingSections::SectionId).primary_key())
                    .col(id_col(SwingSections::SectionGroupId))
                    .col(
                        ColumnDef::new(SwingSections::StartSec)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SwingSections::EndSec)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SwingSections::ImageUrl).text())
                    .col(ColumnDef::new(SwingSections::Tags).json().not_null())
                    .col(ColumnDef::new(SwingSections::MarkupJson).json())
                    .col(ColumnDef::new(SwingSections::CoachComment).text())
                    .col(ColumnDef::new(SwingSections::CoachCommentSummary).text())
                    .col(created_at_col(SwingSections::CreatedAt))
                    .col(created_at_col(SwingSections::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-swing_sections-section_group_id")
                            .from(SwingSections::Table, SwingSections::SectionGroupId)
                            .to(SectionGroups::Table, SectionGroups::SectionGroupId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(SwingSections::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SectionGroups::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CoachingReservations::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CoachingSessions::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Videos::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Coaches::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Locations::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Users {
    Table,
    UserId,
    Usertype,
    Username,
    Email,
    PasswordHash,
    Gender,
    LineUserId,
    ProfilePictureUrl,
    Bio,
    Birthday,
    GolfScoreAve,
    GolfExp,
    ZipCode,
    State,
    Address1,
    Address2,
    SportExp,
    Industry,
    JobTitle,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum Coaches {
    Table,
    CoachId,
    Coachname,
    Email,
    PasswordHash,
    HourlyRate,
    LocationId,
    Rank,
    ProfilePictureUrl,
    Bio,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum Locations {
    Table,
    LocationId,
    Name,
    Address,
    Capacity,
    ImageUrl,
    VideoUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum Videos {
    Table,
    VideoId,
    UserId,
    VideoUrl,
    ThumbnailUrl,
    ClubType,
    SwingForm,
    SwingNote,
    SectionGroupId,
    IsPinned,
    IsReviewed,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum CoachingSessions {
    Table,
    SessionId,
    VideoId,
    UserId,
    CoachId,
    SessionStatus,
    RequestedAt,
    CompletedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum CoachingReservations {
    Table,
    // persisted name of the reservation primary key
    SessionId,
    UserId,
    CoachId,
    SessionDate,
    SessionTime,
    DurationMinutes,
    LocationType,
    LocationId,
    Status,
    Price,
    PaymentStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum SectionGroups {
    Table,
    SectionGroupId,
    VideoId,
    SessionId,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum SwingSections {
    Table,
    SectionId,
    SectionGroupId,
    StartSec,
    EndSec,
    ImageUrl,
    Tags,
    MarkupJson,
    CoachComment,
    CoachCommentSummary,
    CreatedAt,
    UpdatedAt,
}
