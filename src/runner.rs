use crate::config::Settings;
use crate::error::Result;
use crate::formatter::Formatter;
use crate::git::GitRepo;
use crate::model::Release;
use crate::project::Project;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tracing::info;

/// Apply every release of `formatter` to `project`, oldest first, leaving one
/// dated and tagged commit per release on a branch named after the formatter.
///
/// With `reset` the branch is recreated from the default branch; without it
/// the run continues on top of whatever the branch already holds.
pub fn run_tests(
    project: &Project,
    formatter: &Formatter,
    settings: &Settings,
    reset: bool,
) -> Result<()> {
    let repo = GitRepo::open(project.root())?;

    if reset {
        repo.reset_hard()?;
        repo.checkout(&project.default_branch)?;
        if repo.has_object(formatter.name()) {
            repo.delete_branch(formatter.name())?;
        }
        repo.create_branch(formatter.name())?;
    }

    let pb = ProgressBar::new(formatter.releases.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for release in &formatter.releases {
        pb.set_message(release.tag_name());
        run_test(&repo, project, formatter, release, settings)?;
        pb.inc(1);
    }

    pb.finish_with_message(format!("{} releases applied", formatter.releases.len()));
    Ok(())
}

/// Install `release`, format a pristine copy of the project with it and
/// record the result as a commit tagged with the release's tag name.
pub fn run_test(
    repo: &GitRepo,
    project: &Project,
    formatter: &Formatter,
    release: &Release,
    settings: &Settings,
) -> Result<()> {
    let started = Instant::now();
    let tag = release.tag_name();
    info!(%tag, "run test");

    if repo.has_object(&tag) {
        repo.delete_tag(&tag)?;
    }

    release.install(settings)?;
    repo.reset_hard()?;
    formatter.format(project, settings)?;
    repo.commit_all_dated(&release.commit_message(), release.upload_time)?;
    repo.tag(&tag)?;

    let elapsed = Duration::from_secs(started.elapsed().as_secs());
    info!(%tag, elapsed = %humantime::format_duration(elapsed), "release applied");
    Ok(())
}
