//! CSV output for report tables

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::reporting::ReportTable;
use crate::traits::TableSink;
use crate::types::*;

/// Write `table` as CSV, header first, cells in column order
pub fn write_csv<W: Write>(table: &ReportTable, writer: W) -> ReconResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&table.columns)?;
    for row in &table.rows {
        csv.write_record(table.ordered_values(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes each table to `<dir>/<stem> - <name>.csv`
#[derive(Debug, Clone)]
pub struct CsvTableSink {
    dir: PathBuf,
    stem: String,
    written: Vec<PathBuf>,
}

impl CsvTableSink {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            written: Vec::new(),
        }
    }

    /// Path a table with this name is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{} - {}.csv", self.stem, name))
    }

    /// Every file written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl TableSink for CsvTableSink {
    fn write_table(&mut self, name: &str, table: &ReportTable) -> ReconResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        write_csv(table, File::create(&path)?)?;
        info!(path = %path.display(), rows = table.len(), "table written");
        self.written.push(path);
        Ok(())
    }
}
