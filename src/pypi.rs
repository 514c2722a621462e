//! Release metadata from a PyPI-compatible JSON index.

use crate::error::{FmtError, Result};
use crate::model::Release;
use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Deserialize)]
pub struct PackageInfo {
    pub releases: BTreeMap<String, Vec<Artifact>>,
}

#[derive(Debug, Deserialize)]
pub struct Artifact {
    pub upload_time: String,
}

pub struct IndexClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl IndexClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("fmtchurn/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Every published release of `package`, oldest first.
    pub fn fetch_releases(&self, package: &str) -> Result<Vec<Release>> {
        let url = format!("{}/{}/json", self.base_url, package);
        info!(%url, "fetching release history");
        let info: PackageInfo = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;
        releases_from_info(package, &info)
    }
}

/// Versions without artifacts are skipped; the first artifact's upload time
/// stands for the release date.
pub fn releases_from_info(package: &str, info: &PackageInfo) -> Result<Vec<Release>> {
    let mut releases = Vec::with_capacity(info.releases.len());
    for (version, artifacts) in &info.releases {
        let Some(first) = artifacts.first() else {
            debug!(package, %version, "no artifacts, skipping");
            continue;
        };
        let naive = NaiveDateTime::parse_from_str(&first.upload_time, UPLOAD_TIME_FORMAT)
            .map_err(|e| {
                FmtError::InvalidDate(format!(
                    "{package} {version}: upload_time '{}': {e}",
                    first.upload_time
                ))
            })?;
        releases.push(Release::new(package, version, Utc.from_utc_datetime(&naive)));
    }
    sort_releases(&mut releases);
    Ok(releases)
}

pub fn sort_releases(releases: &mut [Release]) {
    releases.sort_by(|a, b| {
        a.upload_time
            .cmp(&b.upload_time)
            .then_with(|| a.version.cmp(&b.version))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "info": {"name": "black"},
        "releases": {
            "19.3b0": [{"upload_time": "2019-03-14T17:08:54", "filename": "a.whl"}],
            "18.3a0": [
                {"upload_time": "2018-03-14T12:59:12"},
                {"upload_time": "2018-03-15T00:00:00"}
            ],
            "0.0.1": [],
            "18.9b0": [{"upload_time": "2018-09-14T12:55:03"}]
        }
    }"#;

    #[test]
    fn releases_are_sorted_and_empty_versions_dropped() {
        let info: PackageInfo = serde_json::from_str(BODY).unwrap();
        let releases = releases_from_info("black", &info).unwrap();
        let versions: Vec<_> = releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, ["18.3a0", "18.9b0", "19.3b0"]);
        assert!(releases.windows(2).all(|w| w[0].upload_time <= w[1].upload_time));
        assert_eq!(releases[0].upload_time.to_rfc3339(), "2018-03-14T12:59:12+00:00");
        assert_eq!(releases[0].formatter, "black");
    }

    #[test]
    fn bad_timestamp_is_reported() {
        let raw = r#"{"releases": {"1.0": [{"upload_time": "yesterday"}]}}"#;
        let info: PackageInfo = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            releases_from_info("yapf", &info),
            Err(FmtError::InvalidDate(_))
        ));
    }
}
