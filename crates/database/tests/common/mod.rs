#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use database::{
    Store, StoreConfig,
    entities::{coaches, coaching_sessions, locations, users, videos},
    services::{CoachService, LocationService, SessionService, UserService, VideoService},
};
use models::{
    booking::NewReservation,
    ids::Guid,
    media::NewVideo,
    profile::{NewCoach, NewLocation, NewUser},
    status::LocationType,
};
use rust_decimal::Decimal;
use std::time::Duration;
use tempfile::TempDir;

/// A private in-memory database that lives as long as its single pooled connection
pub fn memory_config() -> StoreConfig {
    let mut config = StoreConfig::new("sqlite::memory:");
    config.max_connections = 1;
    config.min_connections = 1;
    config.idle_timeout = None;
    config.max_lifetime = None;
    config.acquire_timeout = Duration::from_secs(2);
    config.connect_retries = 0;
    config
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub async fn store() -> Store {
    init_logging();
    let store = Store::connect(&memory_config())
        .await
        .expect("Failed to open in-memory store");
    store.migrate().await.expect("Failed to run migrations");
    store
}

/// A file-backed database served by several pooled connections, so concurrent writers
/// really run side by side. The directory must outlive the store.
pub async fn shared_store() -> (TempDir, Store) {
    init_logging();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("store.db").display());

    let mut config = StoreConfig::new(url);
    config.max_connections = 4;
    config.min_connections = 1;
    config.acquire_timeout = Duration::from_secs(5);
    config.connect_retries = 0;

    let store = Store::connect(&config)
        .await
        .expect("Failed to open file-backed store");
    store.migrate().await.expect("Failed to run migrations");
    (dir, store)
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

/// Seconds with two fractional digits, e.g. `sec(550)` is 5.50
pub fn sec(hundredths: i64) -> Decimal {
    Decimal::new(hundredths, 2)
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        username: "Test Golfer".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$test".to_string(),
        ..Default::default()
    }
}

pub fn new_coach(email: &str) -> NewCoach {
    NewCoach {
        coachname: "Test Coach".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$test".to_string(),
        hourly_rate: Some(Decimal::new(800000, 2)),
        ..Default::default()
    }
}

pub fn new_location(name: &str) -> NewLocation {
    NewLocation {
        name: name.to_string(),
        address: "1-2-3 Fairway, Tokyo".to_string(),
        capacity: 4,
        ..Default::default()
    }
}

pub fn new_video() -> NewVideo {
    NewVideo {
        video_url: "https://cdn.example.com/swing.mp4".to_string(),
        club_type: Some("driver".to_string()),
        ..Default::default()
    }
}

pub fn reservation(user_id: Guid, coach_id: Guid, on: &str, at: &str) -> NewReservation {
    NewReservation {
        user_id,
        coach_id,
        session_date: date(on),
        session_time: time(at),
        duration_minutes: None,
        location_type: LocationType::SimulationGolf,
        location_id: None,
        price: Decimal::new(1200000, 2),
    }
}

pub async fn user(store: &Store, email: &str) -> users::Model {
    UserService::create(store, new_user(email)).await.unwrap()
}

pub async fn coach(store: &Store, email: &str) -> coaches::Model {
    CoachService::create(store, new_coach(email)).await.unwrap()
}

pub async fn location(store: &Store, name: &str) -> locations::Model {
    LocationService::create(store, new_location(name))
        .await
        .unwrap()
}

pub async fn video(store: &Store, owner: Guid) -> videos::Model {
    VideoService::register(store, owner, new_video()).await.unwrap()
}

/// A user with one video under review by a coach, session already started
pub struct ReviewFixture {
    pub user: users::Model,
    pub coach: coaches::Model,
    pub video: videos::Model,
    pub session: coaching_sessions::Model,
}

pub async fn review(store: &Store) -> ReviewFixture {
    let user = user(store, "student@example.com").await;
    let coach = coach(store, "coach@example.com").await;
    let video = video(store, user.user_id).await;
    let session = SessionService::request(store, user.user_id, coach.coach_id, video.video_id)
        .await
        .unwrap();
    let session = SessionService::start(store, session.session_id)
        .await
        .unwrap();

    ReviewFixture {
        user,
        coach,
        video,
        session,
    }
}
