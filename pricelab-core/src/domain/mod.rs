//! Domain types for PriceLab

pub mod bar;
pub mod table;

pub use bar::Bar;
pub use table::{EnrichedRecord, EnrichedTable, TimeSeriesTable};
