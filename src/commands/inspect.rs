use crate::cli::CommonArgs;
use crate::stats::{is_valid, lines_of_code};
use anyhow::Context;
use console::style;

pub fn loc(common: &CommonArgs, name: &str, language: &str) -> anyhow::Result<()> {
    let settings = super::settings(common)?;
    let project = super::project(common, name, &settings)?;
    let lines = lines_of_code(&project, language).context("Failed to count lines of code")?;
    println!("{} {} lines of {}", project.name, style(lines).cyan(), language);
    Ok(())
}

pub fn validate(common: &CommonArgs, name: &str) -> anyhow::Result<()> {
    let settings = super::settings(common)?;
    let project = super::project(common, name, &settings)?;
    let valid = is_valid(&project, &settings).context("Failed to compile project sources")?;
    if !valid {
        anyhow::bail!("{} contains files that do not compile", project.name);
    }
    println!("{} {}", style("Valid:").green().bold(), project.name);
    Ok(())
}
