//! Correcting journal entries for whatever is left unreconciled

use bigdecimal::BigDecimal;

use crate::reporting::table::{Cell, ReportTable, Row};
use crate::tree::{Partition, ReconciliationTree};
use crate::types::*;
use crate::utils::money::{is_zero_currency, sum_rounded};

pub const CORRECTING_COLUMNS: [&str; 8] = [
    "Category",
    "Element",
    "Employee",
    "Company",
    "Department",
    "Account",
    "Amount",
    "Description",
];

/// Company every payroll correction posts to
pub const CORRECTION_COMPANY: u32 = 1100;
/// Accounts below this post to the balance-sheet cost center
pub const DEPARTMENT_THRESHOLD_ACCOUNT: u32 = 400000;
pub const BALANCE_SHEET_DEPARTMENT: u32 = 90000;
pub const EXPENSE_DEPARTMENT: u32 = 700001;

/// Department for a correction posted to `account`
pub fn correction_department(account: u32) -> u32 {
    if account < DEPARTMENT_THRESHOLD_ACCOUNT {
        BALANCE_SHEET_DEPARTMENT
    } else {
        EXPENSE_DEPARTMENT
    }
}

/// A single correcting posting
#[derive(Debug, Clone, PartialEq)]
pub struct JournalLine {
    pub company: u32,
    pub department: u32,
    pub account: u32,
    pub amount: BigDecimal,
    pub description: String,
}

impl JournalLine {
    fn correction(account: u32, amount: BigDecimal, employee: EmployeeNumber) -> Self {
        Self {
            company: CORRECTION_COMPANY,
            department: correction_department(account),
            account,
            amount,
            description: format!("correction of costing error for employee {}", employee),
        }
    }
}

/// Journal lines that neutralize the unreconciled entries of one partition.
///
/// Costing entries are reversed in place. Each payroll amount is debited to
/// the element's first debit account and credited to its first credit
/// account. The lines must net to zero.
pub fn correcting_lines(
    employee: EmployeeNumber,
    element: &Element,
    partition: &Partition,
) -> ReconResult<Vec<JournalLine>> {
    let mut lines = Vec::new();

    for transaction in partition.unreconciled() {
        match transaction {
            Transaction::Costing(costing) => lines.push(JournalLine {
                company: costing.company(),
                department: costing.department(),
                account: costing.account(),
                amount: -costing.amount().clone(),
                description: format!("reversal of costing error for employee {}", employee),
            }),
            Transaction::Payroll(payroll) => {
                let amount = payroll.amount().clone();
                lines.push(JournalLine::correction(
                    element.primary_debit_account(),
                    amount.clone(),
                    employee,
                ));
                lines.push(JournalLine::correction(
                    element.primary_credit_account(),
                    -amount,
                    employee,
                ));
            }
        }
    }

    if !is_zero_currency(&sum_rounded(lines.iter().map(|line| &line.amount))) {
        return Err(ReconError::UnbalancedCorrection {
            element: element.payroll_name.clone(),
            employee,
        });
    }

    Ok(lines)
}

/// Correcting entries for every partition with unreconciled transactions.
///
/// Fails on the first partition whose lines do not balance.
pub fn build_correcting_entries(tree: &ReconciliationTree) -> ReconResult<ReportTable> {
    let mut table = ReportTable::new(&CORRECTING_COLUMNS);

    for (employee, element, partition) in tree.iter_partitions() {
        if partition.is_settled() {
            continue;
        }
        for line in correcting_lines(employee.number, element, partition)? {
            let mut row = Row::new();
            row.insert("Category".to_string(), Cell::text(&element.payroll_category));
            row.insert("Element".to_string(), Cell::text(&element.payroll_name));
            row.insert("Employee".to_string(), Cell::Integer(employee.number.0));
            row.insert("Company".to_string(), Cell::Integer(line.company));
            row.insert("Department".to_string(), Cell::Integer(line.department));
            row.insert("Account".to_string(), Cell::Integer(line.account));
            row.insert("Amount".to_string(), Cell::amount(&line.amount));
            row.insert("Description".to_string(), Cell::Text(line.description));
            table.push(row);
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn regular_pay() -> Element {
        Element::new(
            "Regular Pay".to_string(),
            "REG".to_string(),
            "Standard Earnings".to_string(),
            "Earnings".to_string(),
            vec![500000, 510000],
            vec![200000],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_department_threshold() {
        assert_eq!(correction_department(200000), 90000);
        assert_eq!(correction_department(399999), 90000);
        assert_eq!(correction_department(400000), 700001);
        assert_eq!(correction_department(500000), 700001);
    }

    #[test]
    fn test_payroll_is_posted_to_primary_accounts() {
        let mut partition = Partition::new();
        partition.push_unreconciled(Transaction::payroll(dec("75.00")));

        let lines = correcting_lines(EmployeeNumber(4), &regular_pay(), &partition).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            (lines[0].company, lines[0].department, lines[0].account),
            (1100, 700001, 500000)
        );
        assert_eq!(lines[0].amount, dec("75.00"));
        assert_eq!(
            (lines[1].company, lines[1].department, lines[1].account),
            (1100, 90000, 200000)
        );
        assert_eq!(lines[1].amount, dec("-75.00"));
        assert_eq!(lines[0].description, "correction of costing error for employee 4");
    }

    #[test]
    fn test_costing_is_reversed_in_place() {
        let mut partition = Partition::new();
        partition.push_unreconciled(Transaction::costing(1200, 31000, 600000, dec("12.34")));
        partition.push_unreconciled(Transaction::costing(1200, 32000, 600000, dec("-12.34")));

        let lines = correcting_lines(EmployeeNumber(4), &regular_pay(), &partition).unwrap();

        assert_eq!(lines[0].department, 31000);
        assert_eq!(lines[0].amount, dec("-12.34"));
        assert_eq!(lines[1].company, 1200);
        assert_eq!(lines[1].amount, dec("12.34"));
        assert_eq!(lines[1].description, "reversal of costing error for employee 4");
    }

    #[test]
    fn test_unbalanced_costing_cannot_be_corrected() {
        let mut partition = Partition::new();
        partition.push_unreconciled(Transaction::costing(1100, 90000, 500000, dec("10.00")));

        let err = correcting_lines(EmployeeNumber(8), &regular_pay(), &partition).unwrap_err();
        assert!(matches!(
            err,
            ReconError::UnbalancedCorrection { ref element, employee: EmployeeNumber(8) }
                if element == "Regular Pay"
        ));
    }
}
