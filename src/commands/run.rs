use crate::cli::CommonArgs;
use crate::formatter::{Formatter, FormatterKind};
use crate::runner::run_tests;
use anyhow::Context;
use console::style;

pub fn exec(
    common: &CommonArgs,
    name: &str,
    kind: FormatterKind,
    reset: bool,
) -> anyhow::Result<()> {
    let settings = super::settings(common)?;
    let project = super::project(common, name, &settings)?;
    let formatter = Formatter::load(kind, &settings, common.refresh)
        .with_context(|| format!("Failed to load releases for {}", kind.name()))?;

    if !project.archive_path().is_file() {
        anyhow::bail!(
            "No archive at {}; run `fmtchurn clone {}` first",
            project.archive_path().display(),
            project.name
        );
    }

    run_tests(&project, &formatter, &settings, reset)
        .with_context(|| format!("Failed to apply {} releases to {}", kind.name(), project.name))?;

    println!(
        "{} {} releases of {} applied to {}",
        style("Done:").green().bold(),
        formatter.releases.len(),
        formatter.name(),
        project.name
    );
    Ok(())
}
