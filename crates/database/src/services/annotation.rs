use super::{
    VideoService,
    consistency::{require_section_group, require_session, require_video, section_group_scope},
};
use crate::{
    db::Store,
    entities::{section_groups, swing_sections, videos},
    error::StoreError,
};
use chrono::Utc;
use log::{debug, info};
use models::{
    annotation::NewSwingSection, ids::Guid, interval::TimeRange, status::SessionStatus,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

pub struct AnnotationService;

impl AnnotationService {
    /// Opens an annotation pass over `video_id` within `session_id`.
    ///
    /// The session must be under way or finished and the video must belong to the
    /// session's user. The video is marked reviewed in the same transaction.
    pub async fn create_section_group(
        store: &Store,
        video_id: Guid,
        session_id: Guid,
    ) -> Result<section_groups::Model, StoreError> {
        store
            .run("create section group", async move {
                let txn = store.begin().await?;
                let session = require_session(&txn, session_id).await?;
                let video = require_video(&txn, video_id).await?;

                if !matches!(
                    session.session_status,
                    SessionStatus::InProgress | SessionStatus::Completed
                ) {
                    return Err(StoreError::Precondition(format!(
                        "session {session_id} is {}, not in progress or completed",
                        session.session_status.as_str()
                    )));
                }
                if video.user_id != session.user_id {
                    return Err(StoreError::Precondition(format!(
                        "video {video_id} does not belong to the user of session {session_id}"
                    )));
                }

                let duplicate = section_groups::Entity::find()
                    .filter(section_groups::Column::VideoId.eq(video_id))
                    .filter(section_groups::Column::SessionId.eq(session_id))
                    .one(&txn)
                    .await?;
                if let Some(group) = duplicate {
                    return Err(StoreError::Conflict(format!(
                        "session {session_id} already annotated video {video_id} as group {}",
                        group.section_group_id
                    )));
                }

                let group = section_groups::ActiveModel {
                    section_group_id: Set(Guid::new()),
                    video_id: Set(video_id),
                    session_id: Set(session_id),
                    created_at: Set(Utc::now()),
                }
                .insert(&txn)
                .await?;
                VideoService::mark_reviewed(&txn, video_id, group.section_group_id).await?;
                txn.commit().await?;

                info!(
                    "Created section group {} for video {video_id} in session {session_id}",
                    group.section_group_id
                );
                Ok(group)
            })
            .await
    }

    pub async fn get_group(
        store: &Store,
        section_group_id: Guid,
    ) -> Result<section_groups::Model, StoreError> {
        store
            .run(
                "get section group",
                require_section_group(store.connection(), section_group_id),
            )
            .await
    }

    /// Oldest first
    pub async fn list_groups_for_video(
        store: &Store,
        video_id: Guid,
    ) -> Result<Vec<section_groups::Model>, StoreError> {
        store
            .run("list section groups", async move {
                Ok(section_groups::Entity::find()
                    .filter(section_groups::Column::VideoId.eq(video_id))
                    .order_by_asc(section_groups::Column::CreatedAt)
                    .all(store.connection())
                    .await?)
            })
            .await
    }

    /// Adds a time range to a group; it must not overlap any sibling
    pub async fn add_swing_section(
        store: &Store,
        section_group_id: Guid,
        new: NewSwingSection,
    ) -> Result<swing_sections::Model, StoreError> {
        let range = TimeRange::swing_section(new.start_sec, new.end_sec)?;
        if !new.markup_is_valid() {
            return Err(StoreError::Validation(
                "markup must be a JSON object".to_string(),
            ));
        }

        store
            .run("add swing section", async move {
                let guarded = store
                    .begin_guarded(&section_group_scope(section_group_id))
                    .await?;
                let txn = guarded.conn();
                require_section_group(txn, section_group_id).await?;

                let siblings = swing_sections::Entity::find()
                    .filter(swing_sections::Column::SectionGroupId.eq(section_group_id))
                    .all(txn)
                    .await?;
                let existing = siblings
                    .iter()
                    .filter_map(|s| s.range().map(|r| (s.section_id, r)));
                if let Some(clash) = range.first_overlap(existing) {
                    return Err(StoreError::Overlap(format!(
                        "[{}, {}) overlaps section {clash} of group {section_group_id}",
                        range.start(),
                        range.end()
                    )));
                }

                let now = Utc::now();
                let section = swing_sections::ActiveModel {
                    section_id: Set(Guid::new()),
                    section_group_id: Set(section_group_id),
                    start_sec: Set(range.start()),
                    end_sec: Set(range.end()),
                    image_url: Set(new.image_url),
                    tags: Set(new.tags),
                    markup_json: Set(new.markup),
                    coach_comment: Set(new.coach_comment),
                    coach_comment_summary: Set(new.coach_comment_summary),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?;
                guarded.commit().await?;

                debug!(
                    "Added section {} [{}, {}) to group {section_group_id}",
                    section.section_id, section.start_sec, section.end_sec
                );
                Ok(section)
            })
            .await
    }

    /// Sections of a group ordered by `start_sec`
    pub async fn list_sections(
        store: &Store,
        section_group_id: Guid,
    ) -> Result<Vec<swing_sections::Model>, StoreError> {
        store
            .run("list swing sections", async move {
                Ok(swing_sections::Entity::find()
                    .filter(swing_sections::Column::SectionGroupId.eq(section_group_id))
                    .order_by_asc(swing_sections::Column::StartSec)
                    .all(store.connection())
                    .await?)
            })
            .await
    }

    /// Comments are the only part of a section that changes after creation
    pub async fn update_comment(
        store: &Store,
        section_id: Guid,
        coach_comment: Option<String>,
        coach_comment_summary: Option<String>,
    ) -> Result<swing_sections::Model, StoreError> {
        store
            .run("update section comment", async move {
                let db = store.connection();
                let section = swing_sections::Entity::find_by_id(section_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| StoreError::not_found("swing section", section_id))?;

                let mut am: swing_sections::ActiveModel = section.into();
                am.coach_comment = Set(coach_comment);
                am.coach_comment_summary = Set(coach_comment_summary);
                am.updated_at = Set(Utc::now());

                Ok(am.update(db).await?)
            })
            .await
    }

    /// Deletes a group with its sections. The video keeps `is_reviewed` and
    /// links its newest remaining group, if any.
    pub async fn delete_section_group(
        store: &Store,
        section_group_id: Guid,
    ) -> Result<(), StoreError> {
        store
            .run("delete section group", async move {
                let guarded = store
                    .begin_guarded(&section_group_scope(section_group_id))
                    .await?;
                let txn = guarded.conn();
                let group = require_section_group(txn, section_group_id).await?;
                let video_id = group.video_id;

                let sections = swing_sections::Entity::delete_many()
                    .filter(swing_sections::Column::SectionGroupId.eq(section_group_id))
                    .exec(txn)
                    .await?;
                group.delete(txn).await?;

                let newest = section_groups::Entity::find()
                    .filter(section_groups::Column::VideoId.eq(video_id))
                    .order_by_desc(section_groups::Column::CreatedAt)
                    .one(txn)
                    .await?
                    .map(|g| g.section_group_id);
                videos::Entity::update_many()
                    .col_expr(videos::Column::SectionGroupId, Expr::value(newest))
                    .col_expr(videos::Column::UpdatedAt, Expr::value(Utc::now()))
                    .filter(videos::Column::VideoId.eq(video_id))
                    .exec(txn)
                    .await?;
                guarded.commit().await?;

                info!(
                    "Deleted section group {section_group_id} and {} section(s)",
                    sections.rows_affected
                );
                Ok(())
            })
            .await
    }
}
