//! Report generation from a fully reconciled tree
//!
//! Every report is a [`ReportTable`]: a fixed column list plus rows keyed by
//! column name, ready for any [`TableSink`](crate::traits::TableSink).

pub mod correcting;
pub mod errors;
pub mod summary;
pub mod table;
pub mod unreconciled;

pub use correcting::*;
pub use errors::*;
pub use summary::*;
pub use table::*;
pub use unreconciled::*;

use tracing::info;

use crate::reconciliation::ReconciliationGap;
use crate::traits::TableSink;
use crate::tree::ReconciliationTree;
use crate::types::ReconResult;

pub const UNRECONCILED_TABLE: &str = "Problematic Entries";
pub const CORRECTING_TABLE: &str = "Correcting JE";
pub const SUMMARY_TABLE: &str = "Summary Table";
pub const ERRORS_TABLE: &str = "Errors";

/// The four output tables of a run
#[derive(Debug, Clone, PartialEq)]
pub struct Reports {
    pub unreconciled: ReportTable,
    pub correcting_entries: ReportTable,
    pub summary: ReportTable,
    pub errors: ReportTable,
}

impl Reports {
    /// Build every report. Fails if any correcting entry does not balance.
    pub fn build(tree: &ReconciliationTree, gaps: &[ReconciliationGap]) -> ReconResult<Self> {
        let reports = Self {
            unreconciled: build_unreconciled_entries(tree),
            correcting_entries: build_correcting_entries(tree)?,
            summary: build_summary_table(tree),
            errors: build_error_report(gaps),
        };
        info!(
            unreconciled = reports.unreconciled.len(),
            correcting = reports.correcting_entries.len(),
            elements = reports.summary.len(),
            errors = reports.errors.len(),
            "reports generated"
        );
        Ok(reports)
    }

    /// Tables paired with their output names, in write order
    pub fn tables(&self) -> [(&'static str, &ReportTable); 4] {
        [
            (UNRECONCILED_TABLE, &self.unreconciled),
            (CORRECTING_TABLE, &self.correcting_entries),
            (SUMMARY_TABLE, &self.summary),
            (ERRORS_TABLE, &self.errors),
        ]
    }

    pub fn write_to<S: TableSink>(&self, sink: &mut S) -> ReconResult<()> {
        for (name, table) in self.tables() {
            sink.write_table(name, table)?;
        }
        Ok(())
    }
}
