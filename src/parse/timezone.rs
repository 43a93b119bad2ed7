//! Wall-clock conversion for the site's civil time (Europe/Amsterdam).
//!
//! The site prints times as naive local clock readings. Rather than
//! round-tripping through a timezone database, the UTC offset is derived
//! from the EU summer-time rule: CEST (+02:00) from 01:00 UTC on the last
//! Sunday of March until 01:00 UTC on the last Sunday of October, CET
//! (+01:00) otherwise.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

const CET_OFFSET_HOURS: i64 = 1;
const CEST_OFFSET_HOURS: i64 = 2;

fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    // only used for March and October, both of which have 31 days
    let last = NaiveDate::from_ymd_opt(year, month, 31)?;
    let back = i64::from(last.weekday().num_days_from_sunday());
    Some(last - Duration::days(back))
}

fn switch_instant(year: i32, month: u32) -> Option<DateTime<Utc>> {
    let day = last_sunday(year, month)?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(1, 0, 0)?))
}

/// UTC offset of the site's local time at `instant`.
pub fn local_offset(instant: DateTime<Utc>) -> Duration {
    let year = instant.year();
    match (switch_instant(year, 3), switch_instant(year, 10)) {
        (Some(start), Some(end)) if instant >= start && instant < end => {
            Duration::hours(CEST_OFFSET_HOURS)
        }
        _ => Duration::hours(CET_OFFSET_HOURS),
    }
}

/// Local midnight for the row at `timestamp`: the row's UTC midnight minus
/// the local offset at `timestamp`.
pub fn local_midnight(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let utc_midnight = timestamp
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(timestamp, |naive| Utc.from_utc_datetime(&naive));
    utc_midnight - local_offset(timestamp)
}

/// Converts an "HH:MM" local clock reading on the row's day into UTC. A
/// missing reading means local midnight.
pub fn local_clock_to_utc(timestamp: DateTime<Utc>, clock: Option<(u32, u32)>) -> DateTime<Utc> {
    let midnight = local_midnight(timestamp);
    match clock {
        Some((hour, minute)) => {
            midnight + Duration::hours(i64::from(hour)) + Duration::minutes(i64::from(minute))
        }
        None => midnight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_last_sunday() {
        assert_eq!(last_sunday(2014, 3), NaiveDate::from_ymd_opt(2014, 3, 30));
        assert_eq!(last_sunday(2014, 10), NaiveDate::from_ymd_opt(2014, 10, 26));
        assert_eq!(last_sunday(2021, 10), NaiveDate::from_ymd_opt(2021, 10, 31));
        assert_eq!(last_sunday(2014, 3).unwrap().weekday(), Weekday::Sun);
    }

    #[test]
    fn test_local_offset_winter_and_summer() {
        assert_eq!(local_offset(utc(2014, 1, 15, 12, 0)), Duration::hours(1));
        assert_eq!(local_offset(utc(2014, 8, 28, 16, 0)), Duration::hours(2));
        assert_eq!(local_offset(utc(2014, 12, 31, 23, 0)), Duration::hours(1));
    }

    #[test]
    fn test_local_offset_switch_boundaries() {
        // spring forward at 01:00 UTC on 2014-03-30
        assert_eq!(local_offset(utc(2014, 3, 30, 0, 59)), Duration::hours(1));
        assert_eq!(local_offset(utc(2014, 3, 30, 1, 0)), Duration::hours(2));
        // fall back at 01:00 UTC on 2014-10-26
        assert_eq!(local_offset(utc(2014, 10, 26, 0, 30)), Duration::hours(2));
        assert_eq!(local_offset(utc(2014, 10, 26, 1, 30)), Duration::hours(1));
    }

    #[test]
    fn test_local_midnight() {
        assert_eq!(
            local_midnight(utc(2014, 8, 28, 16, 0)),
            utc(2014, 8, 27, 22, 0)
        );
        assert_eq!(
            local_midnight(utc(2014, 1, 15, 16, 0)),
            utc(2014, 1, 14, 23, 0)
        );
    }

    #[test]
    fn test_local_clock_to_utc() {
        let row = utc(2014, 8, 28, 16, 0);
        assert_eq!(local_clock_to_utc(row, None), utc(2014, 8, 27, 22, 0));
        assert_eq!(local_clock_to_utc(row, Some((0, 30))), utc(2014, 8, 27, 22, 30));
        assert_eq!(local_clock_to_utc(row, Some((12, 30))), utc(2014, 8, 28, 10, 30));
        assert_eq!(local_clock_to_utc(row, Some((14, 30))), utc(2014, 8, 28, 12, 30));
    }
}
