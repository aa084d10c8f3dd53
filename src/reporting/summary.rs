//! Per-element summary across all employees

use bigdecimal::BigDecimal;
use std::collections::{BTreeMap, BTreeSet};

use crate::reporting::table::{Cell, ReportTable, Row};
use crate::tree::partition::{payroll_less_debits, payroll_sum};
use crate::tree::ReconciliationTree;
use crate::types::Element;
use crate::utils::money::round_currency;

pub const SUMMARY_LEADING_COLUMNS: [&str; 4] = ["Category", "Element", "Payroll Total", "Difference"];

#[derive(Default)]
struct ElementTotals {
    payroll: BigDecimal,
    difference: BigDecimal,
    accounts: BTreeMap<u32, BigDecimal>,
}

/// One row per element seen anywhere in the tree, with a column per GL account.
///
/// Payroll and account totals include reconciled and unreconciled entries.
/// Difference only looks at what is still unreconciled.
pub fn build_summary_table(tree: &ReconciliationTree) -> ReportTable {
    let mut totals: BTreeMap<&str, (&Element, ElementTotals)> = BTreeMap::new();
    let mut accounts = BTreeSet::new();

    for (_, element, partition) in tree.iter_partitions() {
        let (_, entry) = totals
            .entry(element.payroll_name.as_str())
            .or_insert_with(|| (element, ElementTotals::default()));

        entry.payroll += payroll_sum(partition.transactions());
        entry.difference += payroll_less_debits(element, partition.unreconciled());

        for costing in partition.transactions().filter_map(|t| t.as_costing()) {
            accounts.insert(costing.account());
            *entry
                .accounts
                .entry(costing.account())
                .or_insert_with(|| BigDecimal::from(0)) += costing.amount();
        }
    }

    let mut columns: Vec<String> = SUMMARY_LEADING_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.extend(accounts.iter().map(|a| a.to_string()));
    let mut table = ReportTable::new(&columns);

    let zero = BigDecimal::from(0);
    for (element, entry) in totals.values() {
        let mut row = Row::new();
        row.insert("Category".to_string(), Cell::text(&element.payroll_category));
        row.insert("Element".to_string(), Cell::text(&element.payroll_name));
        row.insert("Payroll Total".to_string(), Cell::amount(&entry.payroll));
        row.insert(
            "Difference".to_string(),
            Cell::amount(&round_currency(&entry.difference)),
        );
        for account in &accounts {
            let amount = entry.accounts.get(account).unwrap_or(&zero);
            row.insert(account.to_string(), Cell::amount(amount));
        }
        table.push(row);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;
    use crate::types::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn element(name: &str) -> Element {
        Element::new(
            name.to_string(),
            name.to_uppercase(),
            "Standard Earnings".to_string(),
            "Earnings".to_string(),
            vec![500000],
            vec![200000],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_summary_columns_and_defaults() {
        let mut builder = TreeBuilder::new();
        let regular = element("Regular Pay");
        let bonus = element("Bonus");
        for number in [1, 2] {
            let employee = Employee::new(EmployeeNumber(number), dec("0"));
            builder.add(
                employee.clone(),
                regular.clone(),
                Transaction::payroll(dec("100.00")),
            );
            builder.add(
                employee,
                regular.clone(),
                Transaction::costing(1100, 90000, 500000, dec("80.00")),
            );
        }
        builder.add(
            Employee::without_net_pay(EmployeeNumber(1)),
            bonus,
            Transaction::costing(1100, 700001, 600000, dec("5.00")),
        );
        let (tree, _) = builder.finish();

        let table = build_summary_table(&tree);

        assert_eq!(
            table.columns,
            vec!["Category", "Element", "Payroll Total", "Difference", "500000", "600000"]
        );
        // Elements come out in payroll-name order
        assert_eq!(table.cell(0, "Element"), Some(&Cell::text("Bonus")));
        assert_eq!(table.cell(0, "500000"), Some(&Cell::amount(&dec("0"))));
        assert_eq!(table.cell(0, "Difference"), Some(&Cell::amount(&dec("0"))));

        assert_eq!(table.cell(1, "Payroll Total"), Some(&Cell::amount(&dec("200.00"))));
        assert_eq!(table.cell(1, "Difference"), Some(&Cell::amount(&dec("40.00"))));
        assert_eq!(table.cell(1, "500000"), Some(&Cell::amount(&dec("160.00"))));
        assert_eq!(table.cell(1, "600000"), Some(&Cell::amount(&dec("0.00"))));
    }

    #[test]
    fn test_empty_tree_has_only_leading_columns() {
        let table = build_summary_table(&ReconciliationTree::new());
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), SUMMARY_LEADING_COLUMNS.len());
    }
}
