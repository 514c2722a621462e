use crate::formatter::Formatter;
use crate::model::{Release, ReportMode, ReportOutput, ReportRow, SCHEMA_VERSION};
use crate::project::Project;
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn report_json(
    rows: &[ReportRow],
    project: &Project,
    formatter: &Formatter,
    mode: ReportMode,
) -> Result<()> {
    let output = ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        project: project.name.clone(),
        formatter: formatter.name().to_string(),
        mode,
        rows: rows.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn report_ndjson(rows: &[ReportRow]) -> Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}

pub fn report_table(rows: &[ReportRow], project: &Project, formatter: &Formatter) -> Result<()> {
    if rows.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!(
        "{}",
        style(format!("{} on {}", formatter.name(), project.name)).bold()
    );
    println!(
        "{:<14} {:<20} {:>8} {:>8} {:>8} {:>9}",
        style("Version").bold(),
        style("Date").bold(),
        style("Added").bold(),
        style("Deleted").bold(),
        style("Total").bold(),
        style("Affected").bold()
    );
    println!("{}", "─".repeat(72));
    for r in rows {
        println!(
            "{:<14} {:<20} {:>8} {:>8} {:>8} {:>8.2}%",
            r.version.as_deref().unwrap_or("-"),
            r.date.format("%Y-%m-%d %H:%M"),
            style(r.lines_added).green(),
            style(r.lines_deleted).red(),
            r.lines_total,
            r.affected_pct
        );
    }

    let added: u64 = rows.iter().map(|r| r.lines_added).sum();
    let deleted: u64 = rows.iter().map(|r| r.lines_deleted).sum();
    println!("{}", "─".repeat(72));
    println!(
        "Total churn: {} added, {} deleted over {} rows",
        style(added).green(),
        style(deleted).red(),
        style(rows.len()).cyan()
    );
    Ok(())
}

pub fn releases_json(releases: &[Release]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(releases)?);
    Ok(())
}

pub fn releases_table(formatter: &Formatter) -> Result<()> {
    println!("{}", style(format!("{} releases", formatter.name())).bold());
    println!("{}", "─".repeat(50));
    for r in &formatter.releases {
        println!(
            "{:<20} {}",
            r.version,
            style(r.upload_time.format("%Y-%m-%d %H:%M:%S")).dim()
        );
    }
    println!("\n{} releases", style(formatter.releases.len()).cyan());
    Ok(())
}
