use crate::config::Settings;
use crate::error::{FmtError, Result};
use crate::exec;
use crate::formatter::Formatter;
use crate::git::GitRepo;
use crate::model::{GitStats, Release};
use crate::project::Project;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::process::Command;
use tracing::debug;

/// True if every source file under the project compiles. Relies on
/// `compileall` exiting 1 when at least one file fails.
pub fn is_valid(project: &Project, settings: &Settings) -> Result<bool> {
    let out = exec::run(
        Command::new(&settings.python)
            .args(["-m", "compileall", "-q"])
            .arg(project.root()),
        &[0, 1],
    )?;
    Ok(out.success())
}

/// Code lines (excluding blanks and comments) in `language`, counted by cloc.
pub fn lines_of_code(project: &Project, language: &str) -> Result<u64> {
    let out = exec::check(
        Command::new("cloc")
            .arg("--quiet")
            .arg(format!("--include-lang={language}"))
            .arg("--json")
            .arg(project.root()),
    )?;
    parse_cloc(&out.stdout, language)
}

/// cloc prints nothing at all when no file matched.
pub fn parse_cloc(output: &str, language: &str) -> Result<u64> {
    if output.trim().is_empty() {
        return Ok(0);
    }
    let doc: Value = serde_json::from_str(output)?;
    match doc.get(language).and_then(|lang| lang.get("code")) {
        Some(code) => code
            .as_u64()
            .ok_or_else(|| {
                FmtError::Parse(format!("cloc code count for {language} is not a number"))
            }),
        None => Ok(0),
    }
}

pub fn git_has_object(project: &Project, name: &str) -> Result<bool> {
    Ok(GitRepo::open(project.root())?.has_object(name))
}

/// Churn introduced by a single release: its tag against the commit before it.
pub fn git_stats_release(project: &Project, release: &Release) -> Result<GitStats> {
    let tag = release.tag_name();
    GitRepo::open(project.root())?.diff_stats(&format!("{tag}~1"), &tag)
}

/// Churn on the formatter branch between the commits in effect at `start`
/// and at `end`.
pub fn git_stats_date_range(
    project: &Project,
    formatter: &Formatter,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<GitStats> {
    let repo = GitRepo::open(project.root())?;
    let base = project.default_branch.as_str();
    let branch = formatter.name();

    // Before the first formatted commit the unformatted fork point is in effect.
    let resolve = |when: DateTime<Utc>| -> Result<String> {
        match repo.commit_at(base, branch, when)? {
            Some(id) => Ok(id),
            None => repo.merge_base(base, branch),
        }
    };

    let from = resolve(start)?;
    let to = resolve(end)?;
    debug!(%from, %to, %start, %end, "date range resolved");
    if from == to {
        return Ok(GitStats::default());
    }
    repo.diff_stats(&from, &to)
}
