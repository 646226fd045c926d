//! CSV export of the enriched table.
//!
//! Columns: Date, Open, High, Low, Close, Volume, Daily_Return, MA50, MA200,
//! Volatility. Dates are ISO-8601; floats use the shortest representation
//! that parses back to the same value.
//!
//! Files are written atomically: the full body goes to `<path>.tmp`, which
//! is then renamed into place. A failed export never leaves a partial file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pricelab_core::domain::EnrichedTable;
use tracing::info;

pub const EXPORT_COLUMNS: [&str; 10] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Daily_Return",
    "MA50",
    "MA200",
    "Volatility",
];

/// What was written by [`save_enriched`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: usize,
    /// BLAKE3 digest of the written bytes.
    pub digest: String,
}

/// Render the enriched table as CSV, header included.
pub fn export_enriched_csv(table: &EnrichedTable) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(EXPORT_COLUMNS)?;

    for r in table.records() {
        wtr.write_record([
            r.bar.date.format("%Y-%m-%d").to_string(),
            r.bar.open.to_string(),
            r.bar.high.to_string(),
            r.bar.low.to_string(),
            r.bar.close.to_string(),
            r.bar.volume.to_string(),
            r.daily_return.to_string(),
            r.ma50.to_string(),
            r.ma200.to_string(),
            r.volatility.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write `contents` to `path` via a temp file and rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = temp_path(path);

    if let Err(e) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(
            anyhow::Error::new(e).context(format!("failed to write {}", tmp_path.display()))
        );
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        anyhow::Error::new(e).context(format!("failed to move output into {}", path.display()))
    })
}

/// Export the enriched table to `path`.
pub fn save_enriched(table: &EnrichedTable, path: &Path) -> Result<ExportSummary> {
    let csv = export_enriched_csv(table)?;
    write_atomic(path, csv.as_bytes())?;

    let summary = ExportSummary {
        path: path.to_path_buf(),
        rows: table.len(),
        bytes: csv.len(),
        digest: blake3::hash(csv.as_bytes()).to_hex().to_string(),
    };
    info!(
        path = %summary.path.display(),
        rows = summary.rows,
        digest = %summary.digest,
        "enriched table saved"
    );
    Ok(summary)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pricelab_core::domain::{Bar, EnrichedRecord};

    fn sample_table() -> EnrichedTable {
        EnrichedTable::new(vec![EnrichedRecord {
            bar: Bar {
                date: NaiveDate::from_ymd_opt(2021, 4, 30).unwrap(),
                open: 722.25,
                high: 731.0,
                low: 711.4,
                close: 713.05,
                volume: 2_684_218.0,
            },
            daily_return: -1.25,
            ma50: 700.5,
            ma200: 612.125,
            volatility: 2.5,
        }])
    }

    #[test]
    fn csv_has_header_and_row() {
        let csv = export_enriched_csv(&sample_table()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Open,High,Low,Close,Volume,Daily_Return,MA50,MA200,Volatility"
        );
        assert_eq!(
            lines[1],
            "2021-04-30,722.25,731,711.4,713.05,2684218,-1.25,700.5,612.125,2.5"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn empty_table_is_header_only() {
        let csv = export_enriched_csv(&EnrichedTable::default()).unwrap();
        assert_eq!(
            csv,
            "Date,Open,High,Low,Close,Volume,Daily_Return,MA50,MA200,Volatility\n"
        );
    }

    #[test]
    fn floats_round_trip() {
        let mut table = sample_table().records().to_vec();
        table[0].volatility = 1.0 / 3.0;
        let csv = export_enriched_csv(&EnrichedTable::new(table)).unwrap();
        let field = csv.lines().nth(1).unwrap().split(',').last().unwrap();
        assert_eq!(field.parse::<f64>().unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn temp_path_sits_next_to_target() {
        let tmp = temp_path(Path::new("out/ADANIPORTS_Analyzed.csv"));
        assert_eq!(tmp, PathBuf::from("out/ADANIPORTS_Analyzed.csv.tmp"));
    }

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_atomic(&path, b"a,b\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n");
        assert!(!dir.path().join("out.csv.tmp").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_temp_write_removes_temp_file() {
        // Writes through a link to /dev/full fail with ENOSPC.
        if !Path::new("/dev/full").exists() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let tmp = dir.path().join("out.csv.tmp");
        std::os::unix::fs::symlink("/dev/full", &tmp).unwrap();

        assert!(write_atomic(&path, b"a,b\n").is_err());
        assert!(fs::symlink_metadata(&tmp).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn write_atomic_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(write_atomic(&path, b"x").is_err());
        assert!(!path.exists());
    }
}
