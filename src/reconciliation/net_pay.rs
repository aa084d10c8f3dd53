//! Net pay recomputation from categorized payroll amounts

use bigdecimal::BigDecimal;
use std::collections::BTreeMap;

use crate::tree::partition::payroll_sum;
use crate::tree::EmployeeBranch;
use crate::types::*;
use crate::utils::money::round_currency;

/// Running payroll totals for each recognized category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    totals: [BigDecimal; 6],
}

impl Default for CategoryTotals {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self {
            totals: std::array::from_fn(|_| BigDecimal::from(0)),
        }
    }

    pub fn add(&mut self, category: PayrollCategory, amount: &BigDecimal) {
        self.totals[category.index()] += amount;
    }

    pub fn total(&self, category: PayrollCategory) -> &BigDecimal {
        &self.totals[category.index()]
    }

    /// Earnings less every deduction category, rounded to cents
    pub fn net_pay(&self) -> BigDecimal {
        let mut net = BigDecimal::from(0);
        for category in PayrollCategory::ALL {
            if category.is_earning() {
                net += self.total(category);
            } else {
                net -= self.total(category);
            }
        }
        round_currency(&net)
    }
}

/// Accumulate every payroll amount of an employee, reconciled or not, by category.
///
/// Elements outside the recognized categories do not contribute.
pub fn category_totals(
    branch: &EmployeeBranch,
    elements: &BTreeMap<String, Element>,
) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for (name, partition) in branch.partitions() {
        if let Some(category) = elements.get(name).and_then(Element::category) {
            totals.add(category, &payroll_sum(partition.transactions()));
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_net_pay_formula() {
        let mut totals = CategoryTotals::new();
        totals.add(PayrollCategory::StandardEarnings, &dec("1000.00"));
        totals.add(PayrollCategory::SupplementalEarnings, &dec("200.00"));
        totals.add(PayrollCategory::EmployeeTaxDeductions, &dec("150.00"));
        totals.add(PayrollCategory::InvoluntaryDeductions, &dec("50.00"));
        totals.add(PayrollCategory::PretaxDeductions, &dec("100.00"));
        totals.add(PayrollCategory::VoluntaryDeductions, &dec("25.25"));
        totals.add(PayrollCategory::StandardEarnings, &dec("0.25"));

        assert_eq!(totals.total(PayrollCategory::StandardEarnings), &dec("1000.25"));
        assert_eq!(totals.net_pay(), dec("875.00"));
    }

    #[test]
    fn test_empty_totals_net_to_zero() {
        assert_eq!(CategoryTotals::default().net_pay(), dec("0"));
    }
}
