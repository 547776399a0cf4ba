use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntryId(pub i64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub category: String,
    pub emission_kg: f64,
}

/// Totals of logged emissions, in kg CO2e.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmissionSummary {
    /// Keyed by `YYYY-MM`.
    pub by_month: BTreeMap<String, f64>,
    pub by_category: BTreeMap<String, f64>,
}

impl EmissionSummary {
    pub fn is_empty(&self) -> bool {
        self.by_month.is_empty() && self.by_category.is_empty()
    }

    fn record(&mut self, entry: &LogEntry) {
        let month = entry.date.format("%Y-%m").to_string();
        *self.by_month.entry(month).or_default() += entry.emission_kg;
        *self
            .by_category
            .entry(entry.category.clone())
            .or_default() += entry.emission_kg;
    }
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Stores the emission rounded to two decimals from its exact binary value,
    /// so `1.125` becomes `1.12`.
    pub async fn add_log_entry(
        &self,
        date: NaiveDate,
        category: &str,
        emission_kg: f64,
    ) -> Result<EntryId> {
        let emission_kg = format!("{emission_kg:.2}")
            .parse::<f64>()
            .with_context(|| format!("failed to round emission {emission_kg}"))?;
        let row = sqlx::query(
            "INSERT INTO footprint_log (entry_date, category, emission_kg) VALUES (?, ?, ?) RETURNING entry_id",
        )
        .bind(date)
        .bind(category)
        .bind(emission_kg)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert footprint log entry")?;
        let entry_id = EntryId(row.try_get("entry_id")?);
        tracing::debug!(entry_id = entry_id.0, %date, category, emission_kg, "logged emission");
        Ok(entry_id)
    }

    pub async fn list_log_entries(&self) -> Result<Vec<LogEntry>> {
        let rows = sqlx::query(
            "SELECT entry_date, category, emission_kg FROM footprint_log ORDER BY entry_id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list footprint log entries")?;

        rows.into_iter()
            .map(|row| {
                Ok(LogEntry {
                    date: row.try_get("entry_date")?,
                    category: row.try_get("category")?,
                    emission_kg: row.try_get("emission_kg")?,
                })
            })
            .collect()
    }

    pub async fn summary(&self) -> Result<EmissionSummary> {
        let mut summary = EmissionSummary::default();
        for entry in self.list_log_entries().await? {
            summary.record(&entry);
        }
        Ok(summary)
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
