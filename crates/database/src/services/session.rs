use super::consistency::{require_coach, require_session, require_user, require_video};
use crate::{db::Store, entities::coaching_sessions, error::StoreError};
use chrono::Utc;
use log::{debug, info};
use models::{ids::Guid, status::SessionStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};

pub struct SessionService;

impl SessionService {
    /// Opens a `pending` review request of `video_id` by `coach_id`
    pub async fn request(
        store: &Store,
        user_id: Guid,
        coach_id: Guid,
        video_id: Guid,
    ) -> Result<coaching_sessions::Model, StoreError> {
        store
            .run("request session", async move {
                let txn = store.begin().await?;
                require_user(&txn, user_id).await?;
                require_coach(&txn, coach_id).await?;
                require_video(&txn, video_id).await?;

                let now = Utc::now();
                let session = coaching_sessions::ActiveModel {
                    session_id: Set(Guid::new()),
                    video_id: Set(video_id),
                    user_id: Set(user_id),
                    coach_id: Set(coach_id),
                    session_status: Set(SessionStatus::Pending),
                    requested_at: Set(now),
                    completed_at: Set(None),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?;
                txn.commit().await?;

                info!(
                    "User {user_id} requested session {} with coach {coach_id}",
                    session.session_id
                );
                Ok(session)
            })
            .await
    }

    pub async fn get(
        store: &Store,
        session_id: Guid,
    ) -> Result<coaching_sessions::Model, StoreError> {
        store
            .run("get session", require_session(store.connection(), session_id))
            .await
    }

    /// Newest first
    pub async fn list_for_user(
        store: &Store,
        user_id: Guid,
    ) -> Result<Vec<coaching_sessions::Model>, StoreError> {
        Self::list_by(store, coaching_sessions::Column::UserId, user_id).await
    }

    /// Newest first
    pub async fn list_for_coach(
        store: &Store,
        coach_id: Guid,
    ) -> Result<Vec<coaching_sessions::Model>, StoreError> {
        Self::list_by(store, coaching_sessions::Column::CoachId, coach_id).await
    }

    pub async fn start(
        store: &Store,
        session_id: Guid,
    ) -> Result<coaching_sessions::Model, StoreError> {
        Self::transition(store, session_id, SessionStatus::InProgress).await
    }

    pub async fn complete(
        store: &Store,
        session_id: Guid,
    ) -> Result<coaching_sessions::Model, StoreError> {
        Self::transition(store, session_id, SessionStatus::Completed).await
    }

    pub async fn cancel(
        store: &Store,
        session_id: Guid,
    ) -> Result<coaching_sessions::Model, StoreError> {
        Self::transition(store, session_id, SessionStatus::Cancelled).await
    }

    /// Moves a session to `next` if its current status allows it.
    ///
    /// The write only applies while the row still holds the status it was read with;
    /// `completed_at` is stamped on entry into `completed`.
    pub async fn transition(
        store: &Store,
        session_id: Guid,
        next: SessionStatus,
    ) -> Result<coaching_sessions::Model, StoreError> {
        store
            .run("transition session", async move {
                let db = store.connection();
                loop {
                    let current = require_session(db, session_id).await?;
                    current.session_status.transition(next)?;

                    let now = Utc::now();
                    let mut update = coaching_sessions::Entity::update_many()
                        .col_expr(coaching_sessions::Column::SessionStatus, Expr::value(next))
                        .col_expr(coaching_sessions::Column::UpdatedAt, Expr::value(now));
                    if next == SessionStatus::Completed {
                        update = update.col_expr(
                            coaching_sessions::Column::CompletedAt,
                            Expr::value(Some(now)),
                        );
                    }

                    let result = update
                        .filter(coaching_sessions::Column::SessionId.eq(session_id))
                        .filter(coaching_sessions::Column::SessionStatus.eq(current.session_status))
                        .exec(db)
                        .await?;

                    if result.rows_affected == 1 {
                        info!(
                            "Session {session_id}: {} -> {}",
                            current.session_status.as_str(),
                            next.as_str()
                        );
                        return require_session(db, session_id).await;
                    }

                    debug!("Session {session_id} changed concurrently, re-reading");
                }
            })
            .await
    }

    async fn list_by(
        store: &Store,
        column: coaching_sessions::Column,
        id: Guid,
    ) -> Result<Vec<coaching_sessions::Model>, StoreError> {
        store
            .run("list sessions", async move {
                Ok(coaching_sessions::Entity::find()
                    .filter(column.eq(id))
                    .order_by_desc(coaching_sessions::Column::RequestedAt)
                    .all(store.connection())
                    .await?)
            })
            .await
    }
}
