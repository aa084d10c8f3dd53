//! End-to-end reconciliation runs

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::reconciliation::{ReconciliationGap, Reconciler, StrategyCounts};
use crate::reporting::Reports;
use crate::sources::{ElementTable, SourceReader};
use crate::tree::{ReconciliationTree, TreeBuilder};
use crate::types::*;
use crate::utils::csv_sink::CsvTableSink;

/// A reconciled tree together with everything derived from it
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub tree: ReconciliationTree,
    pub gaps: Vec<ReconciliationGap>,
    pub row_errors: Vec<String>,
    pub counts: StrategyCounts,
    pub reports: Reports,
}

impl Reconciliation {
    /// Reconcile a fully built tree and generate the reports
    pub fn from_builder(builder: TreeBuilder) -> ReconResult<Self> {
        let (mut tree, row_errors) = builder.finish();
        info!(
            employees = tree.employee_count(),
            partitions = tree.partition_count(),
            row_errors = row_errors.len(),
            "reconciliation tree built"
        );

        let mut reconciler = Reconciler::new();
        let gaps = reconciler.reconcile(&mut tree)?;
        let reports = Reports::build(&tree, &gaps)?;

        Ok(Self {
            tree,
            gaps,
            row_errors,
            counts: reconciler.counts(),
            reports,
        })
    }
}

/// Reconcile in-memory CSV sources. Each source is a name and a reader.
pub fn reconcile_sources<'a, I, R>(
    elements: &ElementTable,
    reader: &SourceReader,
    sources: I,
) -> ReconResult<Reconciliation>
where
    I: IntoIterator<Item = (&'a str, R)>,
    R: Read,
{
    let mut builder = TreeBuilder::new();
    for (name, source) in sources {
        reader.ingest(&mut builder, name, source, elements)?;
    }
    Reconciliation::from_builder(builder)
}

/// Outcome of a configured run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_at: NaiveDateTime,
    pub row_errors: Vec<String>,
    pub gaps: Vec<ReconciliationGap>,
    /// Row count of each written table, in write order
    pub tables: Vec<(String, usize)>,
    pub files: Vec<PathBuf>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.row_errors.is_empty() && self.gaps.is_empty()
    }
}

/// Run a reconciliation as configured, stamping outputs with the current time
pub fn run(config: &RunConfig) -> ReconResult<RunReport> {
    run_at(config, Local::now().naive_local())
}

/// Run a reconciliation as configured, stamping outputs with `now`
pub fn run_at(config: &RunConfig, now: NaiveDateTime) -> ReconResult<RunReport> {
    config.validate()?;
    let elements = ElementTable::load(&config.elements_file)?;
    let reader = config.source_reader();

    let mut builder = TreeBuilder::new();
    for path in &config.input_files {
        reader.ingest_file(&mut builder, path, &elements)?;
    }
    let reconciliation = Reconciliation::from_builder(builder)?;

    if !reconciliation.row_errors.is_empty() {
        warn!(count = reconciliation.row_errors.len(), "some rows could not be read");
    }

    let mut sink = CsvTableSink::new(&config.output_dir, config.output_stem(now));
    reconciliation.reports.write_to(&mut sink)?;

    let tables = reconciliation
        .reports
        .tables()
        .iter()
        .map(|(name, table)| (name.to_string(), table.len()))
        .collect();

    Ok(RunReport {
        run_at: now,
        row_errors: reconciliation.row_errors,
        gaps: reconciliation.gaps,
        tables,
        files: sink.written().to_vec(),
    })
}
