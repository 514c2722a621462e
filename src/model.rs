use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

pub const SCHEMA_VERSION: u32 = 1;

/// Timestamp layout used in commit messages, `--date` and revision lookups.
pub const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub formatter: String,
    pub version: String,
    pub upload_time: DateTime<Utc>,
}

impl Release {
    pub fn new(formatter: &str, version: &str, upload_time: DateTime<Utc>) -> Self {
        Self {
            formatter: formatter.to_string(),
            version: version.to_string(),
            upload_time,
        }
    }

    pub fn tag_name(&self) -> String {
        format!("{}/{}", self.formatter, self.version)
    }

    pub fn commit_message(&self) -> String {
        format!(
            "{} from {}",
            self.tag_name(),
            self.upload_time.format(GIT_DATE_FORMAT)
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitStats {
    pub lines_added: u64,
    pub lines_deleted: u64,
}

impl GitStats {
    pub fn churn(&self) -> u64 {
        self.lines_added + self.lines_deleted
    }
}

impl AddAssign for GitStats {
    fn add_assign(&mut self, rhs: Self) {
        self.lines_added += rhs.lines_added;
        self.lines_deleted += rhs.lines_deleted;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub date: DateTime<Utc>,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub lines_total: u64,
    pub affected_pct: f64,
}

impl ReportRow {
    pub fn new(
        version: Option<String>,
        date: DateTime<Utc>,
        stats: GitStats,
        lines_total: u64,
    ) -> Self {
        Self {
            version,
            date,
            lines_added: stats.lines_added,
            lines_deleted: stats.lines_deleted,
            lines_total,
            affected_pct: stats.churn() as f64 * 100.0 / lines_total as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    ByVersion,
    ByDate { days: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub project: String,
    pub formatter: String,
    pub mode: ReportMode,
    pub rows: Vec<ReportRow>,
}
