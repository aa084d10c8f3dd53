//! Flat list of reconciliation gaps

use crate::reconciliation::ReconciliationGap;
use crate::reporting::table::{Cell, ReportTable, Row};

pub const ERROR_COLUMNS: [&str; 2] = ["Description", "Employee"];

pub fn build_error_report(gaps: &[ReconciliationGap]) -> ReportTable {
    let mut table = ReportTable::new(&ERROR_COLUMNS);
    for gap in gaps {
        let mut row = Row::new();
        row.insert("Description".to_string(), Cell::Text(gap.description()));
        row.insert("Employee".to_string(), Cell::Integer(gap.employee.0));
        table.push(row);
    }
    table
}
