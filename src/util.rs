use crate::error::{FmtError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::time::{Duration, SystemTime};

/// Parse a user supplied point in time: RFC3339, `YYYY-MM-DD`,
/// `YYYY-MM-DD HH:MM:SS` (UTC), or a relative phrase such as `90 days ago`.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, crate::model::GIT_DATE_FORMAT) {
        return Ok(Utc.from_utc_datetime(&dt));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    if let Some(duration) = parse_natural_duration(input) {
        let target = SystemTime::now()
            .checked_sub(duration)
            .ok_or_else(|| FmtError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(DateTime::<Utc>::from(target));
    }

    Err(FmtError::InvalidDate(format!("Unrecognised date '{input}'")))
}

fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();
    let units = [(" days ago", 86400u64), (" weeks ago", 7 * 86400), (" months ago", 30 * 86400)];

    units.iter().find_map(|(suffix, secs)| {
        let n: u64 = input.strip_suffix(*suffix)?.trim().parse().ok()?;
        n.checked_mul(*secs).map(Duration::from_secs)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_dates_and_timestamps() {
        let d = parse_date("2020-03-01").unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap());

        let t = parse_date("2020-03-01 12:30:00").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2020, 3, 1, 12, 30, 0).unwrap());

        let r = parse_date("2020-03-01T12:30:00+02:00").unwrap();
        assert_eq!(r, Utc.with_ymd_and_hms(2020, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn relative_dates_are_in_the_past() {
        let d = parse_date("2 weeks ago").unwrap();
        assert!(d < Utc::now());
    }

    #[test]
    fn overflowing_relative_date_is_rejected() {
        assert!(matches!(
            parse_date("99999999999999999 days ago"),
            Err(FmtError::InvalidDate(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(parse_date("yesterday-ish"), Err(FmtError::InvalidDate(_))));
    }
}
