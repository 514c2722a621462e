use crate::error::{FmtError, Result};
use crate::exec;
use crate::model::{GitStats, GIT_DATE_FORMAT};
use chrono::{DateTime, Utc};
use gix::{discover, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// A project checkout. Ref lookups go through gix, mutations through the
/// `git` binary so hooks and config behave exactly as on the command line.
pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = discover(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.path);
        cmd
    }

    /// True if `name` resolves to an object (branch, tag or any revision).
    pub fn has_object(&self, name: &str) -> bool {
        let found = self.repo.rev_parse_single(name).is_ok();
        debug!(name, found, "rev-parse");
        found
    }

    pub fn reset_hard(&self) -> Result<()> {
        exec::check(self.git().args(["reset", "--hard", "HEAD"]))?;
        Ok(())
    }

    pub fn checkout(&self, branch: &str) -> Result<()> {
        exec::check(self.git().args(["checkout", branch]))?;
        Ok(())
    }

    pub fn create_branch(&self, branch: &str) -> Result<()> {
        exec::check(self.git().args(["checkout", "-b", branch]))?;
        Ok(())
    }

    pub fn delete_branch(&self, branch: &str) -> Result<()> {
        exec::check(self.git().args(["branch", "-D", branch]))?;
        Ok(())
    }

    /// Commit every tracked change with author and committer date pinned to `when`.
    /// Empty commits are allowed so each step leaves a point in history.
    pub fn commit_all_dated(&self, message: &str, when: DateTime<Utc>) -> Result<()> {
        let date = format!("{} +0000", when.format(GIT_DATE_FORMAT));
        exec::check(
            self.git()
                .args(["commit", "--date", &date, "--allow-empty", "--all", "--message", message])
                .env("GIT_COMMITTER_DATE", &date),
        )?;
        Ok(())
    }

    pub fn tag(&self, name: &str) -> Result<()> {
        exec::check(self.git().args(["tag", name]))?;
        Ok(())
    }

    pub fn delete_tag(&self, name: &str) -> Result<()> {
        exec::check(self.git().args(["tag", "-d", name]))?;
        Ok(())
    }

    /// Newest commit in `base..branch` committed at or before `when`.
    pub fn commit_at(
        &self,
        base: &str,
        branch: &str,
        when: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let before = format!("--before={} +0000", when.format(GIT_DATE_FORMAT));
        let range = format!("{base}..{branch}");
        let out = exec::check(self.git().args(["rev-list", "-1", &before, &range]))?;
        Ok(first_line(&out.stdout))
    }

    /// The commit `branch` forked from `base`.
    pub fn merge_base(&self, base: &str, branch: &str) -> Result<String> {
        let out = exec::check(self.git().args(["merge-base", base, branch]))?;
        first_line(&out.stdout).ok_or_else(|| {
            FmtError::GitRepo(format!("No common ancestor of '{base}' and '{branch}'"))
        })
    }

    /// Sum of `git diff --numstat from..to`.
    pub fn diff_stats(&self, from: &str, to: &str) -> Result<GitStats> {
        let range = format!("{from}..{to}");
        let out = exec::check(self.git().args(["diff", "--numstat", &range]))?;
        parse_numstat(&out.stdout)
    }
}

fn first_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Parse `added<TAB>deleted<TAB>path` lines. Binary files report `-` and count as zero.
pub fn parse_numstat(output: &str) -> Result<GitStats> {
    let mut stats = GitStats::default();
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let mut chunks = line.split_whitespace();
        let (Some(added), Some(deleted)) = (chunks.next(), chunks.next()) else {
            return Err(FmtError::Parse(format!("Malformed numstat line: {line}")));
        };
        stats += GitStats {
            lines_added: parse_count(added, line)?,
            lines_deleted: parse_count(deleted, line)?,
        };
    }
    Ok(stats)
}

fn parse_count(field: &str, line: &str) -> Result<u64> {
    if field == "-" {
        return Ok(0);
    }
    field
        .parse()
        .map_err(|e| FmtError::Parse(format!("Bad count '{field}' in numstat line '{line}': {e}")))
}
