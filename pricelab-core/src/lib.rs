//! PriceLab Core - domain types, CSV ingest, indicators and the feature engine.
//!
//! This crate contains everything between a raw OHLCV file and the
//! enriched table:
//! - Domain types (bars, time-series tables, enriched records)
//! - CSV ingest with column validation, date parsing and canonical ordering
//! - Single-series indicators (percent change, SMA, rolling volatility)
//! - The feature engine that combines them and keeps complete rows only

pub mod data;
pub mod domain;
pub mod features;
pub mod indicators;

pub use data::{load_csv, DataError, DataFormatError};
pub use domain::{Bar, EnrichedRecord, EnrichedTable, TimeSeriesTable};
pub use features::{compute_features, MIN_HISTORY};
