use crate::cache::Cache;
use crate::config::Settings;
use crate::error::Result;
use crate::exec;
use crate::model::Release;
use crate::project::Project;
use crate::pypi::{sort_releases, IndexClient};
use clap::ValueEnum;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// The supported formatting tools. Each one only differs in how it is
/// invoked and which exit codes still mean "the tree was formatted".
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatterKind {
    Black,
    Yapf,
}

impl FormatterKind {
    /// Package name on the index, also the branch name and tag prefix.
    pub fn name(&self) -> &'static str {
        match self {
            FormatterKind::Black => "black",
            FormatterKind::Yapf => "yapf",
        }
    }

    /// Arguments after `python -m` that format `dir` recursively in place.
    pub fn format_args(&self, dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self {
            FormatterKind::Black => vec!["-m".into(), "black".into()],
            FormatterKind::Yapf => vec![
                "-m".into(),
                "yapf".into(),
                "--in-place".into(),
                "--recursive".into(),
            ],
        };
        args.push(dir.as_os_str().to_owned());
        args
    }

    /// Non-zero codes here mean some files could not be reformatted, not that the run failed.
    pub fn ok_codes(&self) -> &'static [i32] {
        match self {
            FormatterKind::Black => &[0, 1, 2, 123],
            FormatterKind::Yapf => &[0, 1, 2],
        }
    }

    /// Language name as understood by cloc.
    pub fn language(&self) -> &'static str {
        "Python"
    }
}

#[derive(Debug, Clone)]
pub struct Formatter {
    pub kind: FormatterKind,
    pub releases: Vec<Release>,
}

impl Formatter {
    pub fn with_releases(kind: FormatterKind, mut releases: Vec<Release>) -> Self {
        sort_releases(&mut releases);
        Self { kind, releases }
    }

    /// Release history from the cache, falling back to the index when the
    /// cache has nothing for this formatter or `refresh` is set.
    pub fn load(kind: FormatterKind, settings: &Settings, refresh: bool) -> Result<Self> {
        let mut cache = Cache::new(&settings.cache_dir)?;
        let mut releases = if refresh {
            Vec::new()
        } else {
            cache.get_releases(kind.name())?
        };

        if releases.is_empty() {
            let client = IndexClient::new(&settings.index_url)?;
            releases = client.fetch_releases(kind.name())?;
            cache.store_releases(kind.name(), &releases)?;
        } else {
            debug!(formatter = kind.name(), count = releases.len(), "using cached releases");
        }

        Ok(Self::with_releases(kind, releases))
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Re-create the pristine tree from the project's archive, format it in a
    /// scratch directory and sync the result over the checkout.
    pub fn format(&self, project: &Project, settings: &Settings) -> Result<()> {
        let scratch = tempfile::tempdir()?;
        let scratch_path = scratch.path();

        exec::check(
            Command::new("tar")
                .arg("-C")
                .arg(scratch_path)
                .arg("-x")
                .arg("-f")
                .arg(project.archive_path()),
        )?;

        let out = exec::run(
            Command::new(&settings.python).args(self.kind.format_args(scratch_path)),
            self.kind.ok_codes(),
        )?;
        if !out.success() {
            info!(formatter = self.name(), code = out.code, "formatter reported issues");
        }

        let mut source = scratch_path.as_os_str().to_owned();
        source.push("/");
        exec::check(
            Command::new("rsync")
                .arg("-a")
                .arg(source)
                .arg(project.root()),
        )?;
        Ok(())
    }
}

impl Release {
    /// `pip install <formatter>==<version>` into the configured interpreter.
    pub fn install(&self, settings: &Settings) -> Result<()> {
        let spec = format!("{}=={}", self.formatter, self.version);
        info!(%spec, "installing");
        exec::check(
            Command::new(&settings.python).args(["-m", "pip", "install", "--quiet", &spec]),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn commands_differ_per_tool() {
        let dir = Path::new("/tmp/x");
        assert_eq!(
            FormatterKind::Black.format_args(dir),
            vec![OsString::from("-m"), "black".into(), "/tmp/x".into()]
        );
        assert_eq!(
            FormatterKind::Yapf.format_args(dir),
            vec![
                OsString::from("-m"),
                "yapf".into(),
                "--in-place".into(),
                "--recursive".into(),
                "/tmp/x".into()
            ]
        );
        assert!(FormatterKind::Black.ok_codes().contains(&123));
        assert!(!FormatterKind::Yapf.ok_codes().contains(&123));
    }

    #[test]
    fn releases_are_sorted_on_construction() {
        let late = Release::new("black", "2", Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
        let early = Release::new("black", "1", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let f = Formatter::with_releases(FormatterKind::Black, vec![late.clone(), early.clone()]);
        assert_eq!(f.releases, vec![early, late]);
        assert_eq!(f.name(), "black");
    }
}
