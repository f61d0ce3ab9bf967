use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{ids::Guid, status::LocationType};

/// A request to book a coach for a calendar slot
#[derive(Debug, Clone, Deserialize)]
pub struct NewReservation {
    pub user_id: Guid,
    pub coach_id: Guid,
    pub session_date: NaiveDate,
    pub session_time: NaiveTime,
    /// Falls back to the store's configured default when absent
    pub duration_minutes: Option<i64>,
    pub location_type: LocationType,
    pub location_id: Option<Guid>,
    /// `DECIMAL(10,2)`
    pub price: Decimal,
}

/// Precision and scale of a reservation price
pub const PRICE_PRECISION: u32 = 10;
pub const PRICE_SCALE: u32 = 2;

/// Whether `price` fits a non-negative `DECIMAL(10,2)`
pub fn price_fits(price: Decimal) -> bool {
    let max = Decimal::new(10_i64.pow(PRICE_PRECISION) - 1, PRICE_SCALE);

    !price.is_sign_negative() && price.normalize().scale() <= PRICE_SCALE && price <= max
}
