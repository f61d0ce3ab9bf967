use super::consistency::{require_non_empty, require_user, require_video};
use crate::{db::Store, entities::videos, error::StoreError};
use chrono::Utc;
use log::{debug, info};
use models::{
    ids::Guid,
    media::{NewVideo, VideoPatch},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

pub struct VideoService;

impl VideoService {
    /// Registers an uploaded video for an existing user
    pub async fn register(
        store: &Store,
        owner_id: Guid,
        new: NewVideo,
    ) -> Result<videos::Model, StoreError> {
        require_non_empty("video_url", &new.video_url)?;

        store
            .run("register video", async move {
                let txn = store.begin().await?;
                require_user(&txn, owner_id).await?;

                let now = Utc::now();
                let video = videos::ActiveModel {
                    video_id: Set(Guid::new()),
                    user_id: Set(owner_id),
                    video_url: Set(new.video_url),
                    thumbnail_url: Set(new.thumbnail_url),
                    club_type: Set(new.club_type),
                    swing_form: Set(new.swing_form),
                    swing_note: Set(new.swing_note),
                    section_group_id: Set(None),
                    is_pinned: Set(false),
                    is_reviewed: Set(false),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?;
                txn.commit().await?;

                info!("Registered video {} for user {owner_id}", video.video_id);
                Ok(video)
            })
            .await
    }

    pub async fn get(store: &Store, video_id: Guid) -> Result<videos::Model, StoreError> {
        store
            .run("get video", require_video(store.connection(), video_id))
            .await
    }

    /// A user's videos, pinned ones first, then newest first
    pub async fn list_for_user(
        store: &Store,
        user_id: Guid,
    ) -> Result<Vec<videos::Model>, StoreError> {
        store
            .run("list videos", async move {
                Ok(videos::Entity::find()
                    .filter(videos::Column::UserId.eq(user_id))
                    .order_by_desc(videos::Column::IsPinned)
                    .order_by_desc(videos::Column::CreatedAt)
                    .all(store.connection())
                    .await?)
            })
            .await
    }

    /// Flips `is_pinned` in a single statement
    pub async fn toggle_pin(store: &Store, video_id: Guid) -> Result<videos::Model, StoreError> {
        store
            .run("toggle pin", async move {
                let db = store.connection();
                let result = videos::Entity::update_many()
                    .col_expr(
                        videos::Column::IsPinned,
                        Expr::col(videos::Column::IsPinned).not(),
                    )
                    .col_expr(videos::Column::UpdatedAt, Expr::value(Utc::now()))
                    .filter(videos::Column::VideoId.eq(video_id))
                    .exec(db)
                    .await?;
                if result.rows_affected == 0 {
                    return Err(StoreError::not_found("video", video_id));
                }

                let video = require_video(db, video_id).await?;
                debug!("Video {video_id} pinned: {}", video.is_pinned);
                Ok(video)
            })
            .await
    }

    pub async fn set_pinned(
        store: &Store,
        video_id: Guid,
        pinned: bool,
    ) -> Result<videos::Model, StoreError> {
        store
            .run("set pin", async move {
                let db = store.connection();
                let mut am: videos::ActiveModel = require_video(db, video_id).await?.into();
                am.is_pinned = Set(pinned);
                am.updated_at = Set(Utc::now());
                Ok(am.update(db).await?)
            })
            .await
    }

    pub async fn update_metadata(
        store: &Store,
        video_id: Guid,
        patch: VideoPatch,
    ) -> Result<videos::Model, StoreError> {
        store
            .run("update video", async move {
                let db = store.connection();
                let mut am: videos::ActiveModel = require_video(db, video_id).await?.into();

                apply_patch!(am, patch;
                    ;
                    optional: thumbnail_url, club_type, swing_form, swing_note,
                );
                am.updated_at = Set(Utc::now());

                Ok(am.update(db).await?)
            })
            .await
    }

    /// Marks a video reviewed and links its newest annotation pass.
    /// Only section group creation calls this.
    pub(crate) async fn mark_reviewed<C: ConnectionTrait>(
        db: &C,
        video_id: Guid,
        section_group_id: Guid,
    ) -> Result<(), StoreError> {
        let result = videos::Entity::update_many()
            .col_expr(videos::Column::IsReviewed, Expr::value(true))
            .col_expr(
                videos::Column::SectionGroupId,
                Expr::value(Some(section_group_id)),
            )
            .col_expr(videos::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(videos::Column::VideoId.eq(video_id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("video", video_id));
        }

        debug!("Video {video_id} reviewed via section group {section_group_id}");
        Ok(())
    }
}
