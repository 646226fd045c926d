//! Data ingestion: CSV loading, column contract, canonical ordering

pub mod canonicalize;
pub mod ingest;
pub mod schema;

pub use canonicalize::{AnomalyReport, AnomalyType, Canonicalized, Canonicalizer, Severity};
pub use ingest::{load_csv, DataError, DataFormatError, DataIngestor};
pub use schema::REQUIRED_COLUMNS;
