use crate::cli::CommonArgs;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// Filesystem layout and tool locations shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub root: PathBuf,
    pub projects_root: PathBuf,
    pub python: PathBuf,
    pub index_url: String,
    pub cache_dir: PathBuf,
}

impl Settings {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            projects_root: root.join("projects"),
            python: root.join("env").join("bin").join("python"),
            index_url: DEFAULT_INDEX_URL.to_string(),
            cache_dir: root.join(".fmtchurn"),
            root,
        }
    }

    pub fn from_args(common: &CommonArgs) -> Result<Self> {
        let root = match &common.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        let mut settings = Self::new(root);
        if let Some(python) = &common.python {
            settings.python = python.clone();
        }
        if let Some(cache) = &common.cache {
            settings.cache_dir = cache.clone();
        }
        settings.index_url = common.index_url.trim_end_matches('/').to_string();
        Ok(settings)
    }
}
