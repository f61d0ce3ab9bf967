//! Cross-entity checks run inside the transaction of the operation that needs them

use crate::{
    entities::{coaches, coaching_sessions, locations, section_groups, users, videos},
    error::StoreError,
};
use models::{ids::Guid, profile::normalize_email};
use sea_orm::{ConnectionTrait, EntityTrait};

/// Normalized form of an email, or a validation error
pub(crate) fn checked_email(raw: &str) -> Result<String, StoreError> {
    normalize_email(raw).ok_or_else(|| StoreError::Validation(format!("invalid email {raw:?}")))
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) async fn require_user<C: ConnectionTrait>(
    db: &C,
    user_id: Guid,
) -> Result<users::Model, StoreError> {
    users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("user", user_id))
}

pub(crate) async fn require_coach<C: ConnectionTrait>(
    db: &C,
    coach_id: Guid,
) -> Result<coaches::Model, StoreError> {
    coaches::Entity::find_by_id(coach_id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("coach", coach_id))
}

pub(crate) async fn require_location<C: ConnectionTrait>(
    db: &C,
    location_id: Guid,
) -> Result<locations::Model, StoreError> {
    locations::Entity::find_by_id(location_id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("location", location_id))
}

pub(crate) async fn require_video<C: ConnectionTrait>(
    db: &C,
    video_id: Guid,
) -> Result<videos::Model, StoreError> {
    videos::Entity::find_by_id(video_id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("video", video_id))
}

pub(crate) async fn require_session<C: ConnectionTrait>(
    db: &C,
    session_id: Guid,
) -> Result<coaching_sessions::Model, StoreError> {
    coaching_sessions::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("coaching session", session_id))
}

pub(crate) async fn require_section_group<C: ConnectionTrait>(
    db: &C,
    section_group_id: Guid,
) -> Result<section_groups::Model, StoreError> {
    section_groups::Entity::find_by_id(section_group_id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("section group", section_group_id))
}

/// Lock scope serializing bookings of one coach
pub(crate) fn coach_scope(coach_id: Guid) -> String {
    format!("coach:{coach_id}")
}

/// Lock scope serializing writes to the sections of one group
pub(crate) fn section_group_scope(section_group_id: Guid) -> String {
    format!("section_group:{section_group_id}")
}
