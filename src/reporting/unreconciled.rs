//! Detail of every transaction still unreconciled

use bigdecimal::BigDecimal;

use crate::reporting::table::{Cell, ReportTable, Row};
use crate::tree::{Partition, ReconciliationTree};
use crate::types::*;

pub const UNRECONCILED_COLUMNS: [&str; 9] = [
    "Source",
    "Category",
    "Element",
    "Employee",
    "Company",
    "Department",
    "Account",
    "Amount",
    "Description",
];

const NOT_APPLICABLE: &str = "n/a";

/// Why a partition could not be reconciled, judged from what is left over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscrepancyNote {
    AmountsDiffer,
    NoPayrollEntry,
    NotCosted,
}

impl DiscrepancyNote {
    /// `None` when nothing is left unreconciled
    pub fn for_partition(partition: &Partition) -> Option<Self> {
        let unreconciled = partition.unreconciled();
        let has_payroll = unreconciled.iter().any(Transaction::is_payroll);
        let has_costing = unreconciled.iter().any(|t| !t.is_payroll());
        match (has_payroll, has_costing) {
            (true, true) => Some(DiscrepancyNote::AmountsDiffer),
            (false, true) => Some(DiscrepancyNote::NoPayrollEntry),
            (true, false) => Some(DiscrepancyNote::NotCosted),
            (false, false) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscrepancyNote::AmountsDiffer => "amounts differ between sources",
            DiscrepancyNote::NoPayrollEntry => "no corresponding payroll entry",
            DiscrepancyNote::NotCosted => "not costed",
        }
    }
}

/// One row per unreconciled transaction, costing rows first within a partition.
///
/// Costing rows are labelled with the element's costing category and name,
/// payroll rows with its payroll category and name.
pub fn build_unreconciled_entries(tree: &ReconciliationTree) -> ReportTable {
    let mut table = ReportTable::new(&UNRECONCILED_COLUMNS);

    for (employee, element, partition) in tree.iter_partitions() {
        let Some(note) = DiscrepancyNote::for_partition(partition) else {
            continue;
        };

        let common = |source: &str, category: &str, name: &str, amount: &BigDecimal| {
            let mut row = Row::new();
            row.insert("Source".to_string(), Cell::text(source));
            row.insert("Category".to_string(), Cell::text(category));
            row.insert("Element".to_string(), Cell::text(name));
            row.insert("Employee".to_string(), Cell::Integer(employee.number.0));
            row.insert("Amount".to_string(), Cell::amount(amount));
            row.insert("Description".to_string(), Cell::text(note.as_str()));
            row
        };

        for costing in partition.unreconciled().iter().filter_map(Transaction::as_costing) {
            let mut row = common(
                "Costing files",
                &element.costing_category,
                &element.costing_name,
                costing.amount(),
            );
            row.insert("Company".to_string(), Cell::Integer(costing.company()));
            row.insert("Department".to_string(), Cell::Integer(costing.department()));
            row.insert("Account".to_string(), Cell::Integer(costing.account()));
            table.push(row);
        }

        for payroll in partition.unreconciled().iter().filter(|t| t.is_payroll()) {
            let mut row = common(
                "Payroll register",
                &element.payroll_category,
                &element.payroll_name,
                payroll.amount(),
            );
            for column in ["Company", "Department", "Account"] {
                row.insert(column.to_string(), Cell::text(NOT_APPLICABLE));
            }
            table.push(row);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn partition_of(transactions: Vec<Transaction>) -> Partition {
        let mut partition = Partition::new();
        for transaction in transactions {
            partition.push_unreconciled(transaction);
        }
        partition
    }

    #[test]
    fn test_note_by_composition() {
        let payroll = || Transaction::payroll(dec("10.00"));
        let costing = || Transaction::costing(1100, 90000, 500000, dec("10.00"));

        assert_eq!(
            DiscrepancyNote::for_partition(&partition_of(vec![payroll(), costing()])),
            Some(DiscrepancyNote::AmountsDiffer)
        );
        assert_eq!(
            DiscrepancyNote::for_partition(&partition_of(vec![costing()])),
            Some(DiscrepancyNote::NoPayrollEntry)
        );
        assert_eq!(
            DiscrepancyNote::for_partition(&partition_of(vec![payroll()])),
            Some(DiscrepancyNote::NotCosted)
        );
        assert_eq!(DiscrepancyNote::for_partition(&Partition::new()), None);
    }

    #[test]
    fn test_rows_carry_placeholders_for_payroll() {
        let element = Element::new(
            "Overtime".to_string(),
            "OT".to_string(),
            "Supplemental Earnings".to_string(),
            "Earnings".to_string(),
            vec![500000],
            vec![200000],
            true,
        )
        .unwrap();
        let mut builder = TreeBuilder::new();
        let employee = Employee::new(EmployeeNumber(12), dec("40.00"));
        builder.add(employee.clone(), element.clone(), Transaction::payroll(dec("40.00")));
        builder.add(
            employee,
            element,
            Transaction::costing(1100, 90000, 500000, dec("35.00")),
        );
        let (tree, _) = builder.finish();

        let table = build_unreconciled_entries(&tree);

        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "Source"), Some(&Cell::text("Costing files")));
        assert_eq!(table.cell(0, "Account"), Some(&Cell::Integer(500000)));
        assert_eq!(table.cell(0, "Element"), Some(&Cell::text("OT")));
        assert_eq!(table.cell(1, "Element"), Some(&Cell::text("Overtime")));
        assert_eq!(table.cell(1, "Source"), Some(&Cell::text("Payroll register")));
        assert_eq!(table.cell(1, "Company"), Some(&Cell::text("n/a")));
        assert_eq!(
            table.cell(1, "Description"),
            Some(&Cell::text("amounts differ between sources"))
        );
    }
}
