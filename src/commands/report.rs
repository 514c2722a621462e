use crate::cli::CommonArgs;
use crate::formatter::{Formatter, FormatterKind};
use crate::model::ReportMode;
use crate::output::{report_json, report_ndjson, report_table};
use crate::report::{ultimate_answer_by_date, ultimate_answer_by_version};
use crate::util::parse_date;
use anyhow::Context;

pub fn exec(
    common: &CommonArgs,
    name: &str,
    kind: FormatterKind,
    days: Option<u32>,
    start: Option<&str>,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let settings = super::settings(common)?;
    let project = super::project(common, name, &settings)?;
    let formatter = Formatter::load(kind, &settings, common.refresh)
        .with_context(|| format!("Failed to load releases for {}", kind.name()))?;

    let (rows, mode) = match days {
        Some(days) => {
            let start = start
                .map(parse_date)
                .transpose()
                .context("Failed to parse --start")?;
            let rows = ultimate_answer_by_date(&project, &formatter, days, start)
                .context("Failed to compute churn by date")?;
            (rows, ReportMode::ByDate { days })
        }
        None => {
            let rows = ultimate_answer_by_version(&project, &formatter)
                .context("Failed to compute churn by version")?;
            (rows, ReportMode::ByVersion)
        }
    };

    if json {
        report_json(&rows, &project, &formatter, mode)
    } else if ndjson {
        report_ndjson(&rows)
    } else {
        report_table(&rows, &project, &formatter)
    }
}
