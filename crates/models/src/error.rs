use thiserror::Error;

/// A state machine was asked to move along an edge it does not have
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal {machine} transition: {from} -> {to}")]
pub struct TransitionError {
    pub machine: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

/// A time range or decimal bound that cannot be stored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range start {start} must be before end {end}")]
    Inverted { start: String, end: String },
    #[error("range bound {0} must not be negative")]
    Negative(String),
    #[error("value {value} exceeds DECIMAL({precision},{scale})")]
    OutOfPrecision {
        value: String,
        precision: u32,
        scale: u32,
    },
    #[error("duration of {0} minutes is outside 1..=1440")]
    Duration(i64),
    #[error("{0} is too close to the end of the calendar")]
    OutOfCalendar(String),
}
