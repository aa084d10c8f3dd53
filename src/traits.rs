//! Traits at the boundaries of the reconciliation core

use std::collections::HashMap;

use crate::reporting::ReportTable;
use crate::sources::ElementTable;
use crate::types::*;

/// A source row keyed by column header
pub type RawRow = HashMap<String, String>;

/// Result of turning one raw row into reconciliation input
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// The row maps to a transaction for an employee and element
    Entry {
        employee: Employee,
        element: Element,
        transaction: Transaction,
    },
    /// The row does not take part in reconciliation (hours, zero amounts, uncosted elements)
    Skip,
    /// The row could not be interpreted
    Failed(RowError),
}

impl From<Result<RowOutcome, RowError>> for RowOutcome {
    fn from(result: Result<RowOutcome, RowError>) -> Self {
        result.unwrap_or_else(RowOutcome::Failed)
    }
}

/// Converts rows of one source schema into reconciliation input
///
/// Implementations exist for the payroll register and the costing feed; the
/// tree builder only ever sees the [`RowOutcome`] they produce.
pub trait RowBuilder {
    /// Human-readable schema name used in logs and error messages
    fn schema(&self) -> &'static str;

    /// Columns a source must carry to be read with this builder
    fn required_columns(&self) -> &'static [&'static str];

    /// Interpret a single row
    fn build_row(&self, row: &RawRow, elements: &ElementTable) -> RowOutcome;
}

/// Destination for finished report tables
pub trait TableSink {
    /// Persist a table under the given name
    fn write_table(&mut self, name: &str, table: &ReportTable) -> ReconResult<()>;
}
