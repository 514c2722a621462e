use crate::cli::CommonArgs;
use anyhow::Context;
use console::style;

pub fn exec(common: &CommonArgs, name: &str) -> anyhow::Result<()> {
    let settings = super::settings(common)?;
    let project = super::project(common, name, &settings)?;

    project.clone_repo().context("Failed to clone project")?;
    project.make_archive().context("Failed to archive default branch")?;

    println!(
        "{} {} at {}",
        style("Ready:").green().bold(),
        project.name,
        project.root().display()
    );
    Ok(())
}
