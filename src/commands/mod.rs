pub mod clone;
pub mod inspect;
pub mod releases;
pub mod report;
pub mod run;

use crate::cli::CommonArgs;
use crate::config::Settings;
use crate::project::Project;
use anyhow::Context;

fn settings(common: &CommonArgs) -> anyhow::Result<Settings> {
    Settings::from_args(common).context("Failed to resolve workspace settings")
}

fn project(common: &CommonArgs, name: &str, settings: &Settings) -> anyhow::Result<Project> {
    Project::lookup(name, common.url.as_deref(), common.branch.as_deref(), settings)
        .with_context(|| format!("Failed to resolve project '{name}'"))
}
