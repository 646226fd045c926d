//! Presentation seam.
//!
//! The pipeline hands the enriched table to a `Presenter` before export.
//! Presenters only observe the table; nothing they produce flows back.

use anyhow::Result;
use pricelab_core::domain::EnrichedTable;

pub trait Presenter {
    /// Short label used in logs (e.g. "terminal", "none").
    fn name(&self) -> &str;

    fn present(&mut self, table: &EnrichedTable) -> Result<()>;
}

/// Presenter for headless runs: does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn name(&self) -> &str {
        "none"
    }

    fn present(&mut self, _table: &EnrichedTable) -> Result<()> {
        Ok(())
    }
}
