//! In-memory table sink for testing

use std::collections::BTreeMap;

use crate::reporting::ReportTable;
use crate::traits::TableSink;
use crate::types::*;

/// Keeps every written table, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSink {
    tables: BTreeMap<String, ReportTable>,
}

impl MemoryTableSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ReportTable> {
        self.tables.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl TableSink for MemoryTableSink {
    fn write_table(&mut self, name: &str, table: &ReportTable) -> ReconResult<()> {
        self.tables.insert(name.to_string(), table.clone());
        Ok(())
    }
}
