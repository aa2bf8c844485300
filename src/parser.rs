//! CSV loader for the order dataset.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::OrderRecord;

/// Reads every order row from the CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row has an
/// unparseable timestamp, payment value or review score.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<OrderRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open dataset '{}'", path.display()))?;

    let orders = parse_dataset(file)
        .with_context(|| format!("failed to parse dataset '{}'", path.display()))?;

    info!(rows = orders.len(), "Dataset loaded");
    Ok(orders)
}

/// Deserializes order rows from any CSV source with a header line.
pub fn parse_dataset<R: Read>(reader: R) -> Result<Vec<OrderRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        // header is line 1
        let record: OrderRecord =
            result.with_context(|| format!("invalid row at line {}", index + 2))?;
        rows.push(record);
    }

    debug!(rows = rows.len(), "Parsed order rows");
    Ok(rows)
}

/// Serde adapter for purchase timestamps written as `YYYY-MM-DD HH:MM:SS`.
///
/// The ISO `T` separator and a fractional second are accepted as well. A
/// bare date is taken at midnight.
pub mod timestamp_format {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{Deserialize, Deserializer, de};

    const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(raw.trim()).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    }
}

/// Serde adapter for review scores that may be missing or written as a
/// float (`5.0`) by tools that widen integer columns containing gaps.
pub mod score_format {
    use serde::{Deserialize, Deserializer, de};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        if let Ok(score) = raw.parse::<i32>() {
            return Ok(Some(score));
        }

        match raw.parse::<f64>() {
            Ok(score)
                if score.fract() == 0.0
                    && score >= f64::from(i32::MIN)
                    && score <= f64::from(i32::MAX) =>
            {
                Ok(Some(score as i32))
            }
            _ => Err(de::Error::custom(format!("invalid review score '{raw}'"))),
        }
    }
}
