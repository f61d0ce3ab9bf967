use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ids::Guid;

/// Lower-cases and trims an email so uniqueness is case-insensitive.
/// Returns `None` for values that cannot be an address.
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;

    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return None;
    }

    Some(email)
}

/// Signup payload for a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Already hashed by the authentication layer
    pub password_hash: String,
    pub usertype: Option<String>,
    pub gender: Option<String>,
    pub line_user_id: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub golf_score_ave: Option<i32>,
    pub golf_exp: Option<i32>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub sport_exp: Option<String>,
    pub industry: Option<String>,
    pub job_title: Option<String>,
    pub position: Option<String>,
}

/// Partial update of a user; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub gender: Option<String>,
    pub line_user_id: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub golf_score_ave: Option<i32>,
    pub golf_exp: Option<i32>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub sport_exp: Option<String>,
    pub industry: Option<String>,
    pub job_title: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCoach {
    pub coachname: String,
    pub email: String,
    pub password_hash: String,
    pub hourly_rate: Option<Decimal>,
    pub location_id: Option<Guid>,
    pub rank: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachPatch {
    pub coachname: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub location_id: Option<Guid>,
    pub rank: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    pub capacity: i32,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}
