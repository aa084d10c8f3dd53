//! Payroll register rows

use bigdecimal::BigDecimal;

use crate::sources::{ElementTable, NameSubstitutions};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::*;

/// Columns a payroll register must carry
pub const PAYROLL_COLUMNS: &[&str] = &[
    "Person Number",
    "Net Pay",
    "Balance Name",
    "Balance Category",
    "Current",
];

/// Balances on the register that never reach the GL
pub const DEFAULT_EXCLUDED_BALANCES: &[&str] = &["Tuition Non Cash"];

/// Turns payroll register rows into payroll transactions
#[derive(Debug, Clone)]
pub struct PayrollRowBuilder {
    substitutions: NameSubstitutions,
    excluded_balances: Vec<String>,
}

impl Default for PayrollRowBuilder {
    fn default() -> Self {
        Self::new(NameSubstitutions::default())
    }
}

impl PayrollRowBuilder {
    pub fn new(substitutions: NameSubstitutions) -> Self {
        Self {
            substitutions,
            excluded_balances: DEFAULT_EXCLUDED_BALANCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replace the list of balance names that are skipped outright
    pub fn with_excluded_balances(mut self, balances: Vec<String>) -> Self {
        self.excluded_balances = balances;
        self
    }

    fn try_build(&self, row: &RawRow, elements: &ElementTable) -> Result<RowOutcome, RowError> {
        let number = parse_number_field(row, "Person Number")?;
        let balance_name = required_field(row, "Balance Name")?;
        let category = required_field(row, "Balance Category")?.to_lowercase();
        let amount = parse_amount_field(row, "Current")?;
        let net_pay = parse_amount_field(row, "Net Pay")?;

        // Zero, imputed and hours balances carry no dollars to cost
        if amount == BigDecimal::from(0) || category.contains("imputed") || category.contains("hours") {
            return Ok(RowOutcome::Skip);
        }

        let number = validate_non_zero(number, "Employee ID")?;

        if self.excluded_balances.iter().any(|b| b == balance_name) {
            return Ok(RowOutcome::Skip);
        }

        let name = self.substitutions.apply(balance_name);
        let element = elements
            .find_by_payroll_name(&name)
            .ok_or_else(|| RowError::UnknownElement {
                origin: "payroll register".to_string(),
                name: balance_name.to_string(),
            })?;

        if !element.should_cost {
            return Ok(RowOutcome::Skip);
        }

        Ok(RowOutcome::Entry {
            employee: Employee::new(EmployeeNumber(number), net_pay),
            element: element.clone(),
            transaction: Transaction::payroll(amount),
        })
    }
}

impl RowBuilder for PayrollRowBuilder {
    fn schema(&self) -> &'static str {
        "payroll register"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        PAYROLL_COLUMNS
    }

    fn build_row(&self, row: &RawRow, elements: &ElementTable) -> RowOutcome {
        self.try_build(row, elements).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn elements() -> ElementTable {
        vec![
            Element::new(
                "Regular Pay".to_string(),
                "Regular Earnings".to_string(),
                "Standard Earnings".to_string(),
                "Earnings".to_string(),
                vec![500000],
                vec![200000],
                true,
            )
            .unwrap(),
            Element::new(
                "Parking".to_string(),
                "Parking".to_string(),
                "Voluntary Deductions".to_string(),
                "Deductions".to_string(),
                vec![210000],
                vec![220000],
                false,
            )
            .unwrap(),
        ]
        .into_iter()
        .collect()
    }

    fn row(number: &str, name: &str, category: &str, current: &str) -> RawRow {
        [
            ("Person Number", number),
            ("Net Pay", "1,000.00"),
            ("Balance Name", name),
            ("Balance Category", category),
            ("Current", current),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_builds_payroll_entry() {
        let builder = PayrollRowBuilder::default();
        let outcome = builder.build_row(
            &row("42", "Regular Pay", "Standard Earnings", "1,000.004"),
            &elements(),
        );

        match outcome {
            RowOutcome::Entry {
                employee,
                element,
                transaction,
            } => {
                assert_eq!(employee.number, EmployeeNumber(42));
                assert_eq!(employee.total_net_pay(), dec("1000.00"));
                assert_eq!(element.payroll_name, "Regular Pay");
                assert_eq!(transaction, Transaction::payroll(dec("1000.00")));
            }
            other => panic!("expected an entry, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_rows_that_do_not_cost() {
        let builder = PayrollRowBuilder::default();
        let elements = elements();

        let skipped = [
            row("42", "Regular Pay", "Standard Earnings", "0.00"),
            row("42", "Regular Pay", "Imputed Earnings", "10.00"),
            row("42", "Regular Pay", "Hours", "8"),
            row("42", "Tuition Non Cash", "Supplemental Earnings", "10.00"),
            row("42", "Parking", "Voluntary Deductions", "10.00"),
        ];
        for raw in &skipped {
            assert_eq!(builder.build_row(raw, &elements), RowOutcome::Skip);
        }
    }

    #[test]
    fn test_row_errors() {
        let builder = PayrollRowBuilder::default();
        let elements = elements();

        assert_eq!(
            builder.build_row(&row("0", "Regular Pay", "Standard Earnings", "1"), &elements),
            RowOutcome::Failed(RowError::ZeroField("Employee ID".to_string()))
        );
        assert!(matches!(
            builder.build_row(&row("42", "Bonus", "Supplemental Earnings", "1"), &elements),
            RowOutcome::Failed(RowError::UnknownElement { .. })
        ));
        assert!(matches!(
            builder.build_row(&row("abc", "Regular Pay", "Standard Earnings", "1"), &elements),
            RowOutcome::Failed(RowError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_substitution_before_lookup() {
        let builder =
            PayrollRowBuilder::new(NameSubstitutions::new().with("regular", "Regular Pay"));
        let outcome = builder.build_row(
            &row("42", "Regular Salary", "Standard Earnings", "10.00"),
            &elements(),
        );
        assert!(matches!(outcome, RowOutcome::Entry { .. }));
    }
}
