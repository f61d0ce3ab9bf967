use super::consistency::{checked_email, require_non_empty, require_user};
use crate::{db::Store, entities::users, error::StoreError};
use chrono::Utc;
use log::info;
use models::{
    ids::Guid,
    profile::{NewUser, UserPatch},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};

pub struct UserService;

impl UserService {
    pub const DEFAULT_USERTYPE: &'static str = "user";

    /// Registers a user. Emails are unique regardless of case.
    pub async fn create(store: &Store, new: NewUser) -> Result<users::Model, StoreError> {
        require_non_empty("username", &new.username)?;
        let email = checked_email(&new.email)?;

        store
            .run("create user", async move {
                let db = store.connection();
                if Self::lookup_email(db, &email).await?.is_some() {
                    return Err(StoreError::Conflict(format!(
                        "email {email} is already registered"
                    )));
                }

                let now = Utc::now();
                let user = users::ActiveModel {
                    user_id: Set(Guid::new()),
                    usertype: Set(new
                        .usertype
                        .unwrap_or_else(|| Self::DEFAULT_USERTYPE.to_string())),
                    username: Set(new.username),
                    email: Set(email),
                    password_hash: Set(new.password_hash),
                    gender: Set(new.gender),
                    line_user_id: Set(new.line_user_id),
                    profile_picture_url: Set(new.profile_picture_url),
                    bio: Set(new.bio),
                    birthday: Set(new.birthday),
                    golf_score_ave: Set(new.golf_score_ave),
                    golf_exp: Set(new.golf_exp),
                    zip_code: Set(new.zip_code),
                    state: Set(new.state),
                    address1: Set(new.address1),
                    address2: Set(new.address2),
                    sport_exp: Set(new.sport_exp),
                    industry: Set(new.industry),
                    job_title: Set(new.job_title),
                    position: Set(new.position),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(db)
                .await?;

                info!("Created user {}", user.user_id);
                Ok(user)
            })
            .await
    }

    pub async fn get(store: &Store, user_id: Guid) -> Result<users::Model, StoreError> {
        store
            .run("get user", require_user(store.connection(), user_id))
            .await
    }

    pub async fn find_by_email(
        store: &Store,
        email: &str,
    ) -> Result<Option<users::Model>, StoreError> {
        let email = checked_email(email)?;
        store
            .run("find user by email", async move {
                Self::lookup_email(store.connection(), &email).await
            })
            .await
    }

    /// Merges the `Some` fields of `patch` into the stored user
    pub async fn update(
        store: &Store,
        user_id: Guid,
        patch: UserPatch,
    ) -> Result<users::Model, StoreError> {
        let email = patch.email.as_deref().map(checked_email).transpose()?;
        if let Some(username) = &patch.username {
            require_non_empty("username", username)?;
        }

        store
            .run("update user", async move {
                let db = store.connection();
                let mut am: users::ActiveModel = require_user(db, user_id).await?.into();

                if let Some(email) = email {
                    if let Some(other) = Self::lookup_email(db, &email).await? {
                        if other.user_id != user_id {
                            return Err(StoreError::Conflict(format!(
                                "email {email} is already registered"
                            )));
                        }
                    }
                    am.email = Set(email);
                }

                apply_patch!(am, patch;
                    username, password_hash;
                    optional: gender, line_user_id, profile_picture_url, bio, birthday,
                    golf_score_ave, golf_exp, zip_code, state, address1, address2,
                    sport_exp, industry, job_title, position,
                );
                am.updated_at = Set(Utc::now());

                let user = am.update(db).await?;
                info!("Updated user {user_id}");
                Ok(user)
            })
            .await
    }

    async fn lookup_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<users::Model>, StoreError> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?)
    }
}
