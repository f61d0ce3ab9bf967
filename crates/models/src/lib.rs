pub mod annotation;
pub mod booking;
pub mod error;
pub mod ids;
pub mod interval;
pub mod media;
pub mod profile;
pub mod status;
