//! CSV ingest: delimited text file → canonical `TimeSeriesTable`.
//!
//! Every column is read as text so that parse failures can name the line
//! and column. Required columns are selected, extra ones are dropped, rows
//! are parsed into bars, then sorted and deduplicated by date.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::{debug, info, warn};

use super::canonicalize::{Canonicalizer, Severity};
use super::schema::{self, REQUIRED_COLUMNS};
use crate::domain::{Bar, TimeSeriesTable};

/// Date-only formats accepted in the `Date` column.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Date-time formats accepted in the `Date` column; the time part is dropped.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Data ingestor for OHLCV CSV files
pub struct DataIngestor;

impl DataIngestor {
    /// Load, validate and canonicalize a CSV file.
    pub fn load_csv(path: &Path) -> Result<TimeSeriesTable, DataError> {
        info!(path = %path.display(), "loading price data");

        let df = read_frame(path)?;
        let bars = frame_to_bars(&df)?;
        debug!(rows = bars.len(), "parsed rows");

        let canonical = Canonicalizer::canonicalize(bars);
        if canonical.reordered {
            warn!("input was not in ascending date order; rows were sorted by date");
        }
        if canonical.duplicates_dropped > 0 {
            warn!(
                dropped = canonical.duplicates_dropped,
                "duplicate dates found; kept the first occurrence of each"
            );
        }

        for anomaly in Canonicalizer::detect_anomalies(&canonical.table) {
            match anomaly.severity {
                Severity::Warning => warn!(
                    kind = ?anomaly.anomaly_type,
                    count = anomaly.count,
                    "data anomaly"
                ),
                Severity::Info => info!(
                    kind = ?anomaly.anomaly_type,
                    count = anomaly.count,
                    "data anomaly"
                ),
            }
        }

        info!(
            rows = canonical.table.len(),
            first = ?canonical.table.first_date(),
            last = ?canonical.table.last_date(),
            "price data loaded"
        );
        Ok(canonical.table)
    }
}

/// Load a CSV file into a canonical table. See [`DataIngestor::load_csv`].
pub fn load_csv(path: impl AsRef<Path>) -> Result<TimeSeriesTable, DataError> {
    DataIngestor::load_csv(path.as_ref())
}

fn read_frame(path: &Path) -> Result<DataFrame, DataError> {
    if let Err(source) = std::fs::metadata(path) {
        return Err(if source.kind() == std::io::ErrorKind::NotFound {
            DataError::NotFound(path.to_path_buf())
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source,
            }
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| match e {
            PolarsError::IO { error, .. } => DataError::Read {
                path: path.to_path_buf(),
                message: error.to_string(),
            },
            other => DataFormatError::Malformed(other.to_string()).into(),
        })?;

    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    if let Some(missing) = schema::missing_columns(&columns).first() {
        return Err(DataFormatError::MissingColumn(missing.to_string()).into());
    }

    df.select(REQUIRED_COLUMNS)
        .map_err(|e| DataFormatError::Malformed(e.to_string()).into())
}

/// Convert the text-typed frame into bars, in file order.
fn frame_to_bars(df: &DataFrame) -> Result<Vec<Bar>, DataError> {
    let dates = text_column(df, schema::DATE)?;
    let opens = text_column(df, schema::OPEN)?;
    let highs = text_column(df, schema::HIGH)?;
    let lows = text_column(df, schema::LOW)?;
    let closes = text_column(df, schema::CLOSE)?;
    let volumes = text_column(df, schema::VOLUME)?;

    let mut bars = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        // Header is line 1.
        let line = i + 2;
        bars.push(Bar {
            date: parse_date(dates.get(i), line)?,
            open: parse_number(opens.get(i), schema::OPEN, line)?,
            high: parse_number(highs.get(i), schema::HIGH, line)?,
            low: parse_number(lows.get(i), schema::LOW, line)?,
            close: parse_number(closes.get(i), schema::CLOSE, line)?,
            volume: parse_number(volumes.get(i), schema::VOLUME, line)?,
        });
    }

    Ok(bars)
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, DataError> {
    df.column(name)
        .and_then(|c| c.str())
        .map_err(|e| DataFormatError::Malformed(format!("column '{name}': {e}")).into())
}

fn parse_date(raw: Option<&str>, line: usize) -> Result<NaiveDate, DataFormatError> {
    let value = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(DataFormatError::MissingValue {
            column: schema::DATE.to_string(),
            line,
        })?;

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| DataFormatError::InvalidDate {
            value: value.to_string(),
            line,
        })
}

fn parse_number(raw: Option<&str>, column: &str, line: usize) -> Result<f64, DataFormatError> {
    let value = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DataFormatError::MissingValue {
            column: column.to_string(),
            line,
        })?;

    let invalid = || DataFormatError::InvalidNumber {
        column: column.to_string(),
        value: value.to_string(),
        line,
    };

    // `f64::from_str` also takes "NaN" and "inf".
    let number = value.parse::<f64>().map_err(|_| invalid())?;
    if !number.is_finite() || (column == schema::VOLUME && number < 0.0) {
        return Err(invalid());
    }
    Ok(number)
}

/// Malformed input content. Always fatal for the run.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DataFormatError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("line {line}: empty value in column '{column}'")]
    MissingValue { column: String, line: usize },

    #[error("line {line}: cannot parse date '{value}'")]
    InvalidDate { value: String, line: usize },

    #[error("line {line}: cannot parse number '{value}' in column '{column}'")]
    InvalidNumber {
        column: String,
        value: String,
        line: usize,
    },

    #[error("malformed CSV: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error(transparent)]
    Format(#[from] DataFormatError),
}
