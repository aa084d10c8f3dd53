//! General-ledger costing feed rows

use bigdecimal::BigDecimal;

use crate::sources::{ElementTable, NameSubstitutions};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::*;

/// Columns a costing file must carry
pub const COSTING_COLUMNS: &[&str] = &[
    "Employee Number",
    "Element",
    "Company_PC",
    "Department_PC",
    "Account_PC",
    "Debit Amount",
    "Credit Amount",
    "Unit of Measure",
];

/// Turns costing feed rows into costing transactions
#[derive(Debug, Clone, Default)]
pub struct CostingRowBuilder {
    substitutions: NameSubstitutions,
}

impl CostingRowBuilder {
    pub fn new(substitutions: NameSubstitutions) -> Self {
        Self { substitutions }
    }

    fn try_build(&self, row: &RawRow, elements: &ElementTable) -> Result<RowOutcome, RowError> {
        let number = parse_number_field(row, "Employee Number")?;
        let costing_name = required_field(row, "Element")?;
        let company = parse_number_field(row, "Company_PC")?;
        let department = parse_number_field(row, "Department_PC")?;
        let account = parse_number_field(row, "Account_PC")?;
        let unit = required_field(row, "Unit of Measure")?;
        let debit = parse_amount_field(row, "Debit Amount")?;
        let credit = parse_amount_field(row, "Credit Amount")?;

        let zero = BigDecimal::from(0);
        if unit != "Money" || (debit == zero && credit == zero) {
            return Ok(RowOutcome::Skip);
        }

        let name = self.substitutions.apply(costing_name);
        let element = elements
            .find_by_costing_name(&name)
            .ok_or_else(|| RowError::UnknownElement {
                origin: "costing file".to_string(),
                name: costing_name.to_string(),
            })?;

        if !element.should_cost {
            return Ok(RowOutcome::Skip);
        }

        if !element.posts_to(account) {
            return Err(RowError::UnmappedAccount {
                account,
                element: element.costing_name.clone(),
            });
        }

        let number = validate_non_zero(number, "Employee ID")?;
        let company = validate_non_zero(company, "Company number")?;
        let department = validate_non_zero(department, "Department number")?;
        let account = validate_non_zero(account, "Account number")?;

        Ok(RowOutcome::Entry {
            employee: Employee::without_net_pay(EmployeeNumber(number)),
            element: element.clone(),
            transaction: Transaction::costing(company, department, account, debit - credit),
        })
    }
}

impl RowBuilder for CostingRowBuilder {
    fn schema(&self) -> &'static str {
        "costing file"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        COSTING_COLUMNS
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
        std::iter::once(
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
        )
        .collect()
    }

    fn row(
        number: &str,
        company: &str,
        account: &str,
        unit: &str,
        debit: &str,
        credit: &str,
    ) -> RawRow {
        [
            ("Employee Number", number),
            ("Element", "Regular Earnings"),
            ("Company_PC", company),
            ("Department_PC", "90000"),
            ("Account_PC", account),
            ("Debit Amount", debit),
            ("Credit Amount", credit),
            ("Unit of Measure", unit),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_builds_costing_entry_as_debit_less_credit() {
        let builder = CostingRowBuilder::default();
        let outcome = builder.build_row(
            &row("42", "1100", "200000", "Money", "0", "125.50"),
            &elements(),
        );

        match outcome {
            RowOutcome::Entry {
                employee,
                transaction,
                ..
            } => {
                assert_eq!(employee.number, EmployeeNumber(42));
                assert_eq!(employee.total_net_pay(), dec("0"));
                assert_eq!(
                    transaction,
                    Transaction::costing(1100, 90000, 200000, dec("-125.50"))
                );
            }
            other => panic!("expected an entry, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_hours_and_zero_rows() {
        let builder = CostingRowBuilder::default();
        let elements = elements();
        assert_eq!(
            builder.build_row(&row("42", "1100", "500000", "Hours", "8", "0"), &elements),
            RowOutcome::Skip
        );
        assert_eq!(
            builder.build_row(&row("42", "1100", "500000", "Money", "0", "0"), &elements),
            RowOutcome::Skip
        );
    }

    #[test]
    fn test_row_errors() {
        let builder = CostingRowBuilder::default();
        let elements = elements();

        assert_eq!(
            builder.build_row(&row("42", "1100", "999999", "Money", "5", "0"), &elements),
            RowOutcome::Failed(RowError::UnmappedAccount {
                account: 999999,
                element: "Regular Earnings".to_string(),
            })
        );
        assert_eq!(
            builder.build_row(&row("42", "0", "500000", "Money", "5", "0"), &elements),
            RowOutcome::Failed(RowError::ZeroField("Company number".to_string()))
        );
        assert_eq!(
            builder.build_row(&row("0", "1100", "500000", "Money", "5", "0"), &elements),
            RowOutcome::Failed(RowError::ZeroField("Employee ID".to_string()))
        );
    }
}
