//! Output formatting and persistence for dashboard tables.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::DashboardTables;
use csv::WriterBuilder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Logs the tables using Rust's debug pretty-print format.
pub fn print_pretty(tables: &DashboardTables) {
    debug!("{:#?}", tables);
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `value` as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path = %path.display(), "Wrote JSON");
    Ok(())
}

/// Writes `rows` to a CSV file at `path` with a header line.
///
/// The header is written even when `rows` is empty so downstream readers
/// always see the column names.
pub fn write_csv<T: Serialize>(
    path: impl AsRef<Path>,
    headers: &[&str],
    rows: &[T],
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), "Wrote CSV");
    Ok(())
}

/// Exports each dashboard table as its own CSV file under `dir`.
///
/// Returns the paths written, in table order.
pub fn write_tables(dir: impl AsRef<Path>, tables: &DashboardTables) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("failed to create '{}'", dir.display()))?;

    let review = dir.join("review_summary.csv");
    write_csv(&review, &["review_score", "number_of_reviews"], &tables.review_summary)?;

    let sales = dir.join("category_sales.csv");
    write_csv(&sales, &["product_category", "number_of_orders"], &tables.category_sales)?;

    let revenue = dir.join("category_revenue.csv");
    write_csv(&revenue, &["product_category", "total_revenue"], &tables.category_revenue)?;

    let rfm = dir.join("customer_rfm.csv");
    write_csv(
        &rfm,
        &["customer_id", "frequency", "monetary", "recency"],
        &tables.customer_rfm,
    )?;

    info!(dir = %dir.display(), "Dashboard tables exported");
    Ok(vec![review, sales, revenue, rfm])
}
