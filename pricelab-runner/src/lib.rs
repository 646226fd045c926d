//! PriceLab Runner - pipeline orchestration and export.
//!
//! This crate builds on `pricelab-core` to provide:
//! - The staged pipeline (load, enrich, present, export)
//! - The `Presenter` seam implemented by the terminal UI
//! - Atomic CSV export of the enriched table

pub mod export;
pub mod pipeline;
pub mod presenter;

pub use export::{export_enriched_csv, save_enriched, write_atomic, ExportSummary, EXPORT_COLUMNS};
pub use pipeline::{
    export_stage, feature_stage, load_stage, present_stage, run_pipeline, PipelineOptions,
    PipelineReport, PipelineWarning, DEFAULT_INPUT, DEFAULT_OUTPUT,
};
pub use presenter::{NoopPresenter, Presenter};
