//! Day/night derivation from wall-clock time in US Eastern time.
//!
//! Trainer rates switch with the game's clock, which follows New York time.
//! Daylight saving follows the current US rule: from 02:00 local on the
//! second Sunday of March until 02:00 local on the first Sunday of November.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Timelike, Utc, Weekday};

use crate::mode::SelectionMode;

const EST_OFFSET_SECS: i32 = -5 * 3600;
const EDT_OFFSET_SECS: i32 = -4 * 3600;

/// First and last local hour that count as day.
const DAY_START_HOUR: u32 = 6;
const DAY_END_HOUR: u32 = 17;

/// Returns the `n`th Sunday (1-based) of a month.
fn nth_sunday(year: i32, month: u32, n: u32) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Sun, u8::try_from(n).ok()?)
}

/// Whether daylight saving is in effect in the Eastern zone at `now`.
fn is_eastern_dst(now: DateTime<Utc>) -> bool {
    let year = now.year();
    // 02:00 EST is 07:00 UTC; 02:00 EDT is 06:00 UTC.
    let start = nth_sunday(year, 3, 2).and_then(|date| date.and_hms_opt(7, 0, 0));
    let end = nth_sunday(year, 11, 1).and_then(|date| date.and_hms_opt(6, 0, 0));
    match (start, end) {
        (Some(start), Some(end)) => {
            let now = now.naive_utc();
            start <= now && now < end
        }
        _ => false,
    }
}

/// Converts `now` to US Eastern local time.
///
/// The 2007 daylight saving rule is applied to every year, so timestamps
/// before 2007 can be off by an hour around the old April and October
/// switch dates.
pub fn eastern_time(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    let secs = if is_eastern_dst(now) {
        EDT_OFFSET_SECS
    } else {
        EST_OFFSET_SECS
    };
    let offset = FixedOffset::east_opt(secs).unwrap_or_else(|| Utc.fix());
    now.with_timezone(&offset)
}

/// Whether `now` falls between 06:00 and 17:59 Eastern.
pub fn is_eastern_daytime(now: DateTime<Utc>) -> bool {
    (DAY_START_HOUR..=DAY_END_HOUR).contains(&eastern_time(now).hour())
}

/// Rates in effect at `now`.
pub fn mode_at(now: DateTime<Utc>) -> SelectionMode {
    SelectionMode::from_night(!is_eastern_daytime(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn dst_sundays_for_known_year() {
        assert_eq!(nth_sunday(2025, 3, 2), NaiveDate::from_ymd_opt(2025, 3, 9));
        assert_eq!(nth_sunday(2025, 11, 1), NaiveDate::from_ymd_opt(2025, 11, 2));
        assert_eq!(nth_sunday(2026, 3, 2), NaiveDate::from_ymd_opt(2026, 3, 8));
        assert_eq!(nth_sunday(2026, 11, 1), NaiveDate::from_ymd_opt(2026, 11, 1));
    }

    #[test]
    fn winter_uses_standard_time() {
        let local = eastern_time(utc(2025, 1, 15, 12, 0));
        assert_eq!(local.offset().local_minus_utc(), EST_OFFSET_SECS);
        assert_eq!(local.hour(), 7);
    }

    #[test]
    fn summer_uses_daylight_time() {
        let local = eastern_time(utc(2025, 7, 1, 12, 0));
        assert_eq!(local.offset().local_minus_utc(), EDT_OFFSET_SECS);
        assert_eq!(local.hour(), 8);
    }

    #[test]
    fn spring_forward_boundary() {
        assert_eq!(eastern_time(utc(2025, 3, 9, 6, 59)).hour(), 1);
        assert_eq!(eastern_time(utc(2025, 3, 9, 7, 0)).hour(), 3);
    }

    #[test]
    fn fall_back_boundary() {
        assert_eq!(eastern_time(utc(2025, 11, 2, 5, 59)).hour(), 1);
        assert_eq!(eastern_time(utc(2025, 11, 2, 6, 0)).hour(), 1);
        assert_eq!(
            eastern_time(utc(2025, 11, 2, 6, 0)).offset().local_minus_utc(),
            EST_OFFSET_SECS
        );
    }

    #[test]
    fn current_rule_applies_to_earlier_years() {
        // 2006 still switched on the first Sunday of April; this reports EDT.
        let local = eastern_time(utc(2006, 3, 20, 12, 0));
        assert_eq!(local.offset().local_minus_utc(), EDT_OFFSET_SECS);
    }

    #[test]
    fn daytime_window_in_winter() {
        assert!(!is_eastern_daytime(utc(2025, 1, 15, 10, 59)));
        assert!(is_eastern_daytime(utc(2025, 1, 15, 11, 0)));
        assert!(is_eastern_daytime(utc(2025, 1, 15, 22, 59)));
        assert!(!is_eastern_daytime(utc(2025, 1, 15, 23, 0)));
    }

    #[test]
    fn daytime_window_in_summer() {
        assert!(!is_eastern_daytime(utc(2025, 7, 1, 9, 59)));
        assert!(is_eastern_daytime(utc(2025, 7, 1, 10, 0)));
        assert!(!is_eastern_daytime(utc(2025, 7, 1, 22, 0)));
    }

    #[test]
    fn mode_follows_daytime() {
        assert_eq!(mode_at(utc(2025, 7, 1, 16, 0)), SelectionMode::Day);
        assert_eq!(mode_at(utc(2025, 7, 2, 3, 0)), SelectionMode::Night);
    }
}
