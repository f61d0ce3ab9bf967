pub mod coaches;
pub mod coaching_reservations;
pub mod coaching_sessions;
pub mod locations;
pub mod section_groups;
pub mod swing_sections;
pub mod users;
pub mod videos;
