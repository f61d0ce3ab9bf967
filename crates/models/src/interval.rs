use crate::error::RangeError;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use std::fmt::Display;

/// Half-open range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange<T> {
    start: T,
    end: T,
}

impl<T: PartialOrd + Copy + Display> TimeRange<T> {
    pub fn new(start: T, end: T) -> Result<Self, RangeError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(RangeError::Inverted {
                start: start.to_string(),
                end: end.to_string(),
            })
        }
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    /// `s1 < e2 && s2 < e1`, so ranges that only touch do not overlap
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the key of the first existing range that overlaps `self`
    pub fn first_overlap<K>(&self, existing: impl IntoIterator<Item = (K, Self)>) -> Option<K> {
        existing
            .into_iter()
            .find(|(_, range)| self.overlaps(range))
            .map(|(key, _)| key)
    }
}

/// Longest slot a reservation may occupy, in minutes
pub const MAX_RESERVATION_MINUTES: i64 = 24 * 60;

impl TimeRange<NaiveDateTime> {
    /// The calendar window a reservation occupies
    pub fn reservation_slot(
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: i64,
    ) -> Result<Self, RangeError> {
        if !(1..=MAX_RESERVATION_MINUTES).contains(&duration_minutes) {
            return Err(RangeError::Duration(duration_minutes));
        }

        let start = date.and_time(time);
        let end = start
            .checked_add_signed(TimeDelta::minutes(duration_minutes))
            .ok_or_else(|| RangeError::OutOfCalendar(start.to_string()))?;
        Self::new(start, end)
    }

    /// Every slot that could overlap this one starts on one of these dates
    pub fn candidate_dates(&self) -> Result<(NaiveDate, NaiveDate), RangeError> {
        let day = self.start.date();
        match (
            day.checked_sub_days(Days::new(1)),
            day.checked_add_days(Days::new(1)),
        ) {
            (Some(from), Some(to)) => Ok((from, to)),
            _ => Err(RangeError::OutOfCalendar(day.to_string())),
        }
    }
}

/// Precision and scale of a swing section bound, as `DECIMAL(5,2)`
pub const SECTION_PRECISION: u32 = 5;
pub const SECTION_SCALE: u32 = 2;

impl TimeRange<Decimal> {
    /// A swing section in seconds from the start of the video
    pub fn swing_section(start_sec: Decimal, end_sec: Decimal) -> Result<Self, RangeError> {
        for bound in [start_sec, end_sec] {
            check_section_bound(bound)?;
        }

        Self::new(start_sec, end_sec)
    }
}

fn check_section_bound(value: Decimal) -> Result<(), RangeError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RangeError::Negative(value.to_string()));
    }

    let max = Decimal::new(10_i64.pow(SECTION_PRECISION) - 1, SECTION_SCALE);
    if value.normalize().scale() > SECTION_SCALE || value > max {
        return Err(RangeError::OutOfPrecision {
            value: value.to_string(),
            precision: SECTION_PRECISION,
            scale: SECTION_SCALE,
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn sec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    fn at(date: &str, time: &str) -> (NaiveDate, NaiveTime) {
        (
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        )
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let first = TimeRange::new(0, 10).unwrap();
        let second = TimeRange::new(10, 20).unwrap();
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [((0, 10), (5, 15)), ((0, 10), (2, 3)), ((4, 6), (0, 10))];
        for ((s1, e1), (s2, e2)) in cases {
            let a = TimeRange::new(s1, e1).unwrap();
            let b = TimeRange::new(s2, e2).unwrap();
            assert!(a.overlaps(&b));
            assert!(b.overlaps(&a));
        }
    }

    #[test]
    fn test_inverted_and_empty_ranges_are_rejected() {
        assert!(matches!(
            TimeRange::new(5, 5),
            Err(RangeError::Inverted { .. })
        ));
        assert!(TimeRange::new(7, 3).is_err());
    }

    #[test]
    fn test_first_overlap_reports_key() {
        let candidate = TimeRange::new(3, 7).unwrap();
        let existing = vec![
            ("a", TimeRange::new(0, 3).unwrap()),
            ("b", TimeRange::new(6, 9).unwrap()),
            ("c", TimeRange::new(4, 5).unwrap()),
        ];
        assert_eq!(candidate.first_overlap(existing), Some("b"));
        assert_eq!(
            candidate.first_overlap(vec![("x", TimeRange::new(7, 8).unwrap())]),
            None
        );
    }

    #[test]
    fn test_reservation_slots_half_hour_apart_conflict() {
        let (date, ten) = at("2024-06-01", "10:00");
        let (_, half_past) = at("2024-06-01", "10:30");
        let (_, eleven) = at("2024-06-01", "11:00");

        let r1 = TimeRange::reservation_slot(date, ten, 60).unwrap();
        let r2 = TimeRange::reservation_slot(date, half_past, 60).unwrap();
        let r3 = TimeRange::reservation_slot(date, eleven, 60).unwrap();

        assert!(r1.overlaps(&r2));
        assert!(!r1.overlaps(&r3));
    }

    #[test]
    fn test_reservation_slot_crossing_midnight() {
        let (date, late) = at("2024-06-01", "23:30");
        let (next_day, early) = at("2024-06-02", "00:15");

        let tonight = TimeRange::reservation_slot(date, late, 60).unwrap();
        let tomorrow = TimeRange::reservation_slot(next_day, early, 30).unwrap();
        assert!(tonight.overlaps(&tomorrow));

        let (from, to) = tomorrow.candidate_dates().unwrap();
        assert!(from <= date && date <= to);
    }

    #[test]
    fn test_reservation_duration_bounds() {
        let (date, ten) = at("2024-06-01", "10:00");
        assert_eq!(
            TimeRange::reservation_slot(date, ten, 0),
            Err(RangeError::Duration(0))
        );
        assert!(TimeRange::reservation_slot(date, ten, MAX_RESERVATION_MINUTES + 1).is_err());
        assert!(TimeRange::reservation_slot(date, ten, MAX_RESERVATION_MINUTES).is_ok());
    }

    #[test]
    fn test_slots_at_the_edge_of_the_calendar_are_rejected() {
        let late = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        assert!(matches!(
            TimeRange::reservation_slot(NaiveDate::MAX, late, 60),
            Err(RangeError::OutOfCalendar(_))
        ));

        let midnight = NaiveTime::MIN;
        let last = TimeRange::reservation_slot(NaiveDate::MAX, midnight, 60).unwrap();
        assert!(matches!(
            last.candidate_dates(),
            Err(RangeError::OutOfCalendar(_))
        ));
        let first = TimeRange::reservation_slot(NaiveDate::MIN, midnight, 60).unwrap();
        assert!(first.candidate_dates().is_err());
    }

    #[test]
    fn test_swing_section_bounds() {
        assert!(TimeRange::swing_section(sec(0, 0), sec(55, 1)).is_ok());
        assert!(TimeRange::swing_section(sec(0, 0), sec(99999, 2)).is_ok());
        // trailing zeros do not count against the scale
        assert!(TimeRange::swing_section(sec(1000, 3), sec(2500, 3)).is_ok());

        assert!(matches!(
            TimeRange::swing_section(sec(-1, 1), sec(10, 0)),
            Err(RangeError::Negative(_))
        ));
        assert!(matches!(
            TimeRange::swing_section(sec(0, 0), sec(100000, 2)),
            Err(RangeError::OutOfPrecision { .. })
        ));
        assert!(matches!(
            TimeRange::swing_section(sec(1, 3), sec(10, 0)),
            Err(RangeError::OutOfPrecision { .. })
        ));
        assert!(matches!(
            TimeRange::swing_section(sec(55, 1), sec(55, 1)),
            Err(RangeError::Inverted { .. })
        ));
    }
}
