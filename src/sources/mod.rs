//! Input sources: element lookup table, payroll register and costing feed

pub mod costing;
pub mod elements;
pub mod payroll;
pub mod substitutions;

pub use costing::*;
pub use elements::*;
pub use payroll::*;
pub use substitutions::*;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::traits::*;
use crate::tree::TreeBuilder;
use crate::types::*;
use crate::utils::validation::has_required_headers;

/// Schema of an input file, detected from its headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Payroll,
    Costing,
}

/// Reads payroll register and costing files into a [`TreeBuilder`]
#[derive(Debug, Clone, Default)]
pub struct SourceReader {
    payroll: PayrollRowBuilder,
    costing: CostingRowBuilder,
}

impl SourceReader {
    /// Create a reader that applies the same aliases to both schemas
    pub fn new(substitutions: NameSubstitutions) -> Self {
        Self {
            payroll: PayrollRowBuilder::new(substitutions.clone()),
            costing: CostingRowBuilder::new(substitutions),
        }
    }

    /// Override the payroll balances that are skipped outright
    pub fn with_excluded_balances(mut self, balances: Vec<String>) -> Self {
        self.payroll = self.payroll.with_excluded_balances(balances);
        self
    }

    /// Detect the schema from a header row. Costing is checked first.
    pub fn detect<S: AsRef<str>>(&self, headers: &[S]) -> Option<SourceKind> {
        if has_required_headers(headers, self.costing.required_columns()) {
            Some(SourceKind::Costing)
        } else if has_required_headers(headers, self.payroll.required_columns()) {
            Some(SourceKind::Payroll)
        } else {
            None
        }
    }

    fn row_builder(&self, kind: SourceKind) -> &dyn RowBuilder {
        match kind {
            SourceKind::Payroll => &self.payroll,
            SourceKind::Costing => &self.costing,
        }
    }

    /// Read one CSV source into the builder.
    ///
    /// A source whose headers match neither schema is a structural error and
    /// nothing from it is ingested. Malformed records only produce row errors.
    pub fn ingest<R: Read>(
        &self,
        builder: &mut TreeBuilder,
        name: &str,
        reader: R,
        elements: &ElementTable,
    ) -> ReconResult<SourceKind> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let kind = self.detect(&headers).ok_or_else(|| {
            ReconError::Structural(format!(
                "{} does not contain the correct headers for a payroll register or costing file",
                name
            ))
        })?;
        let row_builder = self.row_builder(kind);
        info!(source = name, schema = row_builder.schema(), "parsing source");

        let mut rows = 0usize;
        for (index, record) in reader.records().enumerate() {
            rows += 1;
            match record {
                Ok(record) => {
                    let raw: RawRow = headers
                        .iter()
                        .cloned()
                        .zip(record.iter().map(str::to_string))
                        .collect();
                    builder.ingest(row_builder.build_row(&raw, elements));
                }
                Err(err) => {
                    builder.record_error(format!("{} line {}: {}", name, index + 2, err));
                }
            }
        }

        info!(source = name, rows, "finished source");
        Ok(kind)
    }

    /// Read a CSV file into the builder
    pub fn ingest_file<P: AsRef<Path>>(
        &self,
        builder: &mut TreeBuilder,
        path: P,
        elements: &ElementTable,
    ) -> ReconResult<SourceKind> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ReconError::Io(format!("{}: {}", path.display(), e)))?;
        self.ingest(builder, &path.display().to_string(), file, elements)
    }
}
