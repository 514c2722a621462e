use crate::cli::CommonArgs;
use crate::formatter::{Formatter, FormatterKind};
use crate::output::{releases_json, releases_table};
use anyhow::Context;

pub fn exec(common: &CommonArgs, kind: FormatterKind, json: bool) -> anyhow::Result<()> {
    let settings = super::settings(common)?;
    let formatter = Formatter::load(kind, &settings, common.refresh)
        .with_context(|| format!("Failed to load releases for {}", kind.name()))?;

    if json {
        releases_json(&formatter.releases)
    } else {
        releases_table(&formatter)
    }
}
