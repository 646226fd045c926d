//! Pipeline orchestration.
//!
//! Loader → feature engine → presenter → exporter, each stage taking and
//! returning explicit values. Any fatal error aborts before the export
//! stage, so no output file is written for a failed run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pricelab_core::data::load_csv;
use pricelab_core::domain::{EnrichedTable, TimeSeriesTable};
use pricelab_core::features::{compute_features, MIN_HISTORY};
use tracing::{info, warn};

use crate::export::{save_enriched, ExportSummary};
use crate::presenter::Presenter;

pub const DEFAULT_INPUT: &str = "ADANIPORTS.csv";
pub const DEFAULT_OUTPUT: &str = "ADANIPORTS_Analyzed.csv";

/// Where to read from and write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Non-fatal conditions noticed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    /// Not enough rows for a single complete record; the export is header-only.
    InsufficientHistory { rows: usize, required: usize },
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub input_rows: usize,
    pub output_rows: usize,
    /// BLAKE3 digest of the loaded table.
    pub dataset_hash: String,
    pub export: ExportSummary,
    pub warnings: Vec<PipelineWarning>,
}

pub fn load_stage(path: &Path) -> Result<TimeSeriesTable> {
    load_csv(path).with_context(|| format!("failed to load {}", path.display()))
}

pub fn feature_stage(table: &TimeSeriesTable) -> (EnrichedTable, Vec<PipelineWarning>) {
    info!(rows = table.len(), "engineering features");
    let enriched = compute_features(table);

    let mut warnings = Vec::new();
    if enriched.is_empty() {
        warn!(
            rows = table.len(),
            required = MIN_HISTORY,
            "insufficient history: no row has every feature defined; output will be header-only"
        );
        warnings.push(PipelineWarning::InsufficientHistory {
            rows: table.len(),
            required: MIN_HISTORY,
        });
    } else {
        info!(
            rows = enriched.len(),
            dropped = table.len() - enriched.len(),
            "feature engineering complete"
        );
    }

    (enriched, warnings)
}

pub fn present_stage(presenter: &mut dyn Presenter, table: &EnrichedTable) -> Result<()> {
    info!(presenter = presenter.name(), "presenting charts");
    presenter
        .present(table)
        .with_context(|| format!("presenter '{}' failed", presenter.name()))
}

pub fn export_stage(table: &EnrichedTable, path: &Path) -> Result<ExportSummary> {
    save_enriched(table, path).with_context(|| format!("failed to export {}", path.display()))
}

/// Run the whole pipeline once.
pub fn run_pipeline(
    options: &PipelineOptions,
    presenter: &mut dyn Presenter,
) -> Result<PipelineReport> {
    let table = load_stage(&options.input)?;
    let dataset_hash = table.dataset_hash();
    info!(dataset_hash = %dataset_hash, "dataset fingerprint");

    let (enriched, warnings) = feature_stage(&table);
    present_stage(presenter, &enriched)?;
    let export = export_stage(&enriched, &options.output)?;

    Ok(PipelineReport {
        input_rows: table.len(),
        output_rows: enriched.len(),
        dataset_hash,
        export,
        warnings,
    })
}
