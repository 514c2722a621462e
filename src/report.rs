//! Churn reports over the formatter branch history.
//!
//! Every row uses today's line count as its denominator; reconstructing the
//! historical size would need a checkout per row.

use crate::error::{FmtError, Result};
use crate::formatter::Formatter;
use crate::model::{GitStats, Release, ReportRow};
use crate::project::Project;
use crate::stats::{git_stats_date_range, git_stats_release, lines_of_code};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// What happens if the project upgrades the formatter on every release.
pub fn ultimate_answer_by_version(
    project: &Project,
    formatter: &Formatter,
) -> Result<Vec<ReportRow>> {
    let lines_total = lines_of_code(project, formatter.kind.language())?;
    rows_by_version(&formatter.releases, lines_total, |release| {
        git_stats_release(project, release)
    })
}

/// What happens if the project upgrades the formatter every `days` days,
/// starting at `date_start` or at the first release.
pub fn ultimate_answer_by_date(
    project: &Project,
    formatter: &Formatter,
    days: u32,
    date_start: Option<DateTime<Utc>>,
) -> Result<Vec<ReportRow>> {
    let now = Utc::now();
    let start = match date_start {
        Some(start) => start,
        None => formatter
            .releases
            .first()
            .map(|r| r.upload_time)
            .ok_or_else(|| FmtError::Report(format!("{} has no releases", formatter.name())))?,
    };
    let lines_total = lines_of_code(project, formatter.kind.language())?;
    rows_by_date(start, days, now, lines_total, |from, to| {
        git_stats_date_range(project, formatter, from, to)
    })
}

/// One row per release after the first, which has nothing to compare against.
pub fn rows_by_version<F>(
    releases: &[Release],
    lines_total: u64,
    mut stats_for: F,
) -> Result<Vec<ReportRow>>
where
    F: FnMut(&Release) -> Result<GitStats>,
{
    ensure_lines(lines_total)?;
    releases
        .iter()
        .skip(1)
        .map(|release| {
            let stats = stats_for(release)?;
            Ok(ReportRow::new(
                Some(release.version.clone()),
                release.upload_time,
                stats,
                lines_total,
            ))
        })
        .collect()
}

/// Consecutive `days`-long windows from `start` that end no later than `now`.
/// The first window is dropped to match the per-version report.
pub fn rows_by_date<F>(
    start: DateTime<Utc>,
    days: u32,
    now: DateTime<Utc>,
    lines_total: u64,
    mut stats_for: F,
) -> Result<Vec<ReportRow>>
where
    F: FnMut(DateTime<Utc>, DateTime<Utc>) -> Result<GitStats>,
{
    if days == 0 {
        return Err(FmtError::Report("interval must be at least one day".to_string()));
    }
    ensure_lines(lines_total)?;

    let rows = windows(start, days, now)?
        .into_iter()
        .skip(1)
        .map(|(from, to)| {
            let stats = stats_for(from, to)?;
            debug!(%from, %to, ?stats, "window");
            Ok(ReportRow::new(None, to, stats, lines_total))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(rows)
}

type Window = (DateTime<Utc>, DateTime<Utc>);

fn windows(mut start: DateTime<Utc>, days: u32, now: DateTime<Utc>) -> Result<Vec<Window>> {
    let out_of_range = || FmtError::Report(format!("interval of {days} days is out of range"));
    let step = Duration::try_days(i64::from(days)).ok_or_else(out_of_range)?;
    let mut out = Vec::new();
    loop {
        let end = start.checked_add_signed(step).ok_or_else(out_of_range)?;
        if end > now {
            break;
        }
        out.push((start, end));
        start = end;
    }
    Ok(out)
}

fn ensure_lines(lines_total: u64) -> Result<()> {
    if lines_total == 0 {
        return Err(FmtError::Report(
            "project has no lines of code to compare against".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn releases() -> Vec<Release> {
        vec![
            Release::new("black", "1.0", day(0)),
            Release::new("black", "1.1", day(10)),
            Release::new("black", "2.0", day(25)),
        ]
    }

    #[test]
    fn by_version_skips_first_release() {
        let rows = rows_by_version(&releases(), 1000, |r| {
            Ok(match r.version.as_str() {
                "1.1" => GitStats { lines_added: 40, lines_deleted: 10 },
                "2.0" => GitStats { lines_added: 5, lines_deleted: 5 },
                other => panic!("unexpected release {other}"),
            })
        })
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].version.as_deref(), Some("1.1"));
        assert_eq!(rows[0].date, day(10));
        assert_eq!(rows[0].affected_pct, 5.0);
        assert_eq!(rows[1].version.as_deref(), Some("2.0"));
        assert_eq!(rows[1].affected_pct, 1.0);
        assert!(rows.iter().all(|r| r.lines_total == 1000));
        assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn by_version_percentage_is_exact() {
        let rows = rows_by_version(&releases(), 3, |_| {
            Ok(GitStats { lines_added: 1, lines_deleted: 0 })
        })
        .unwrap();
        for row in rows {
            assert_eq!(
                row.affected_pct,
                (row.lines_added + row.lines_deleted) as f64 * 100.0 / row.lines_total as f64
            );
        }
    }

    #[test]
    fn by_version_with_single_release_is_empty() {
        let all = releases();
        let rows = rows_by_version(&all[..1], 10, |_| unreachable!()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn by_date_stops_before_now() {
        let now = day(35);
        let mut seen = Vec::new();
        let rows = rows_by_date(day(0), 10, now, 100, |from, to| {
            seen.push((from, to));
            Ok(GitStats { lines_added: 1, lines_deleted: 1 })
        })
        .unwrap();

        // windows end at 10, 20, 30; 40 would pass `now`. First one dropped.
        assert_eq!(seen, vec![(day(10), day(20)), (day(20), day(30))]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, day(20));
        assert!(rows.iter().all(|r| r.date <= now));
        assert!(rows.iter().all(|r| r.version.is_none()));
        assert_eq!(rows[1].affected_pct, 2.0);
    }

    #[test]
    fn by_date_window_may_end_exactly_now() {
        let rows = rows_by_date(day(0), 5, day(10), 10, |_, _| Ok(GitStats::default())).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, day(10));
        assert_eq!(rows[0].affected_pct, 0.0);
    }

    #[test]
    fn huge_interval_is_an_error_not_a_panic() {
        let err = rows_by_date(day(0), u32::MAX, Utc::now(), 100, |_, _| {
            Ok(GitStats::default())
        })
        .unwrap_err();
        assert!(matches!(err, FmtError::Report(_)));
    }

    #[test]
    fn zero_days_or_lines_are_rejected() {
        assert!(matches!(
            rows_by_date(day(0), 0, day(10), 10, |_, _| Ok(GitStats::default())),
            Err(FmtError::Report(_))
        ));
        assert!(matches!(
            rows_by_version(&releases(), 0, |_| Ok(GitStats::default())),
            Err(FmtError::Report(_))
        ));
    }
}
