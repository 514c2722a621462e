use crate::error::{FmtError, Result};
use crate::model::{Release, SCHEMA_VERSION};
use chrono::{TimeZone, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

/// Release lists fetched from the package index, kept so reports and resumed
/// runs work offline and see the same history.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        std::fs::create_dir_all(cache_dir.as_ref())?;
        let conn = Connection::open(cache_dir.as_ref().join("cache.db"))?;
        let mut cache = Self { conn };
        cache.initialize()?;
        Ok(cache)
    }

    #[cfg(test)]
    fn in_memory() -> Result<Self> {
        let mut cache = Self {
            conn: Connection::open_in_memory()?,
        };
        cache.initialize()?;
        Ok(cache)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS releases (
                formatter TEXT NOT NULL,
                version TEXT NOT NULL,
                upload_time INTEGER NOT NULL,
                fetched_at INTEGER NOT NULL,
                PRIMARY KEY (formatter, version)
            );
            CREATE INDEX IF NOT EXISTS idx_releases_upload ON releases(formatter, upload_time);
            ",
        )?;
        self.check_schema_version()?;
        Ok(())
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            let set_stmt = format!("PRAGMA user_version = {SCHEMA_VERSION};");
            self.conn.execute_batch(&set_stmt)?;
        } else if user_version != SCHEMA_VERSION as i64 {
            return Err(FmtError::Cache(format!(
                "Schema version mismatch: expected {}, found {}",
                SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }

    /// Cached releases for `formatter`, oldest first. Empty if never fetched.
    pub fn get_releases(&self, formatter: &str) -> Result<Vec<Release>> {
        let mut stmt = self.conn.prepare(
            "SELECT version, upload_time FROM releases
             WHERE formatter = ?
             ORDER BY upload_time, version",
        )?;
        let rows = stmt.query_map(params![formatter], |row| {
            let version: String = row.get(0)?;
            let ts: i64 = row.get(1)?;
            let upload_time = Utc.timestamp_opt(ts, 0).single().ok_or_else(|| {
                rusqlite::Error::InvalidColumnType(
                    1,
                    "upload_time".to_string(),
                    rusqlite::types::Type::Integer,
                )
            })?;
            Ok(Release::new(formatter, &version, upload_time))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Replace everything stored for `formatter` with `releases`.
    pub fn store_releases(&mut self, formatter: &str, releases: &[Release]) -> Result<()> {
        let fetched_at = Utc::now().timestamp();
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM releases WHERE formatter = ?", params![formatter])?;
        {
            let mut insert = tx.prepare(
                "INSERT OR REPLACE INTO releases (formatter, version, upload_time, fetched_at)
                 VALUES (?, ?, ?, ?)",
            )?;
            for r in releases {
                let uploaded = r.upload_time.timestamp();
                insert.execute(params![formatter, r.version, uploaded, fetched_at])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
