use crate::config::Settings;
use crate::error::{FmtError, Result};
use crate::exec;
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// A codebase under test, e.g. "flask".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub url: String,
    pub default_branch: String,
    projects_root: PathBuf,
}

/// Built-in registry: (name, url, default branch).
pub const BUILTIN_PROJECTS: &[(&str, &str, &str)] = &[
    // about 800 LOC
    ("dotenv", "git@github.com:theskumar/python-dotenv.git", "master"),
    // almost 10k LOC
    ("flask", "git@github.com:pallets/flask.git", "master"),
];

impl Project {
    pub fn new(name: &str, url: &str, default_branch: &str, settings: &Settings) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            default_branch: default_branch.to_string(),
            projects_root: settings.projects_root.clone(),
        }
    }

    /// Resolve `name` against the registry. An explicit `url` always wins and
    /// `branch` overrides the registered default branch.
    pub fn lookup(
        name: &str,
        url: Option<&str>,
        branch: Option<&str>,
        settings: &Settings,
    ) -> Result<Self> {
        let builtin = BUILTIN_PROJECTS.iter().find(|(n, _, _)| *n == name);
        let (url, default_branch) = match (url, builtin) {
            (Some(url), _) => (url, branch.unwrap_or("master")),
            (None, Some((_, url, b))) => (*url, branch.unwrap_or(*b)),
            (None, None) => return Err(FmtError::UnknownProject(name.to_string())),
        };
        Ok(Self::new(name, url, default_branch, settings))
    }

    pub fn root(&self) -> PathBuf {
        self.projects_root.join(&self.name)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.projects_root.join(format!("{}.tar", self.name))
    }

    /// A `git` command running inside the checkout.
    pub fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(self.root());
        cmd
    }

    /// Clone from the remote unless the checkout already exists.
    pub fn clone_repo(&self) -> Result<()> {
        if self.root().is_dir() {
            info!(project = %self.name, "checkout already present, skipping clone");
            return Ok(());
        }
        std::fs::create_dir_all(&self.projects_root)?;
        info!(project = %self.name, url = %self.url, "cloning");
        exec::check(
            Command::new("git")
                .args(["clone", &self.url, &self.name])
                .current_dir(&self.projects_root),
        )?;
        Ok(())
    }

    /// Snapshot the default branch's tree as a tar file next to the checkout.
    pub fn make_archive(&self) -> Result<()> {
        let output = self.archive_path();
        info!(project = %self.name, archive = %output.display(), "writing archive");
        exec::check(
            self.git()
                .args(["archive", &self.default_branch, "--format=tar"])
                .arg("--output")
                .arg(&output),
        )?;
        Ok(())
    }
}
