use thiserror::Error;

pub type Result<T> = std::result::Result<T, FmtError>;

#[derive(Error, Debug)]
pub enum FmtError {
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Command `{program} {args}` exited with {code}: {stderr}")]
    Command {
        program: String,
        args: String,
        code: String,
        stderr: String,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Cache error: {0}")]
    Cache(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Unknown project '{0}' (pass --url to define it)")]
    UnknownProject(String),
    #[error("Report error: {0}")]
    Report(String),
}

impl From<gix::discover::Error> for FmtError {
    fn from(err: gix::discover::Error) -> Self {
        FmtError::GitDiscover(Box::new(err))
    }
}
