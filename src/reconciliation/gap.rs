//! Non-fatal reconciliation findings

use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::types::EmployeeNumber;

/// What kind of gap remained after every strategy ran
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GapKind {
    /// Transactions are still unreconciled
    Unreconciled,
    /// Reconciled payroll and debit costing disagree by `amount`
    Difference { amount: BigDecimal },
}

/// A warning row for the error report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationGap {
    pub employee: EmployeeNumber,
    /// Payroll name of the element
    pub element: String,
    pub kind: GapKind,
}

impl ReconciliationGap {
    pub fn unreconciled(employee: EmployeeNumber, element: &str) -> Self {
        Self {
            employee,
            element: element.to_string(),
            kind: GapKind::Unreconciled,
        }
    }

    pub fn difference(employee: EmployeeNumber, element: &str, amount: BigDecimal) -> Self {
        Self {
            employee,
            element: element.to_string(),
            kind: GapKind::Difference { amount },
        }
    }

    pub fn description(&self) -> String {
        match &self.kind {
            GapKind::Unreconciled => {
                format!("Reconciliation could not be completed for \"{}\"", self.element)
            }
            GapKind::Difference { amount } => format!(
                "Unreconciled difference of ${} between payroll and costing elements was detected for \"{}\"",
                amount, self.element
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_descriptions() {
        let gap = ReconciliationGap::unreconciled(EmployeeNumber(5), "Regular Pay");
        assert_eq!(
            gap.description(),
            "Reconciliation could not be completed for \"Regular Pay\""
        );

        let gap = ReconciliationGap::difference(
            EmployeeNumber(5),
            "Regular Pay",
            BigDecimal::from_str("12.50").unwrap(),
        );
        assert!(gap.description().contains("$12.50"));
    }
}
