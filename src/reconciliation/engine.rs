//! Reconciliation driver: invariants around the ordered strategies

use tracing::{debug, info, warn};

use crate::reconciliation::gap::ReconciliationGap;
use crate::reconciliation::net_pay::category_totals;
use crate::reconciliation::strategies::*;
use crate::tree::partition::{costing_sum, payroll_less_debits};
use crate::tree::{EmployeeBranch, Partition, ReconciliationTree};
use crate::types::*;
use crate::utils::money::is_zero_currency;

/// Number of transactions each strategy moved during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyCounts {
    pub exact: usize,
    pub reclassified: usize,
    pub combinatorial: usize,
}

/// Reconciles every partition of a tree in place
#[derive(Debug, Default)]
pub struct Reconciler {
    counts: StrategyCounts,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves made so far, per strategy
    pub fn counts(&self) -> StrategyCounts {
        self.counts
    }

    /// Reconcile the whole tree in employee, then element, order.
    ///
    /// Returns the non-fatal gaps. Any integrity failure aborts immediately
    /// and no gaps are returned.
    pub fn reconcile(
        &mut self,
        tree: &mut ReconciliationTree,
    ) -> ReconResult<Vec<ReconciliationGap>> {
        let ReconciliationTree { branches, elements } = tree;
        let mut gaps = Vec::new();

        for branch in branches.values_mut() {
            Self::check_net_pay(branch, elements)?;

            let number = branch.employee.number;
            for (name, partition) in branch.partitions.iter_mut() {
                let element = elements.get(name).ok_or_else(|| {
                    ReconError::Structural(format!("Element \"{}\" is not registered in the tree", name))
                })?;
                gaps.extend(self.reconcile_partition(number, element, partition)?);
            }
        }

        info!(
            exact = self.counts.exact,
            reclassified = self.counts.reclassified,
            combinatorial = self.counts.combinatorial,
            gaps = gaps.len(),
            "reconciliation complete"
        );
        Ok(gaps)
    }

    /// The employee's categorized payroll must recompute to the reported net pay
    fn check_net_pay(
        branch: &EmployeeBranch,
        elements: &std::collections::BTreeMap<String, Element>,
    ) -> ReconResult<()> {
        let recomputed = category_totals(branch, elements).net_pay();
        let recorded = branch.employee.total_net_pay();
        if recomputed != recorded {
            return Err(ReconError::NetPayMismatch {
                employee: branch.employee.number,
                recomputed,
                recorded,
            });
        }
        Ok(())
    }

    /// Run the strategies on one partition and validate the result
    pub fn reconcile_partition(
        &mut self,
        employee: EmployeeNumber,
        element: &Element,
        partition: &mut Partition,
    ) -> ReconResult<Vec<ReconciliationGap>> {
        let name = element.payroll_name.as_str();

        // The costing batch must balance before anything is matched against it
        if !is_zero_currency(&costing_sum(partition.unreconciled(), |_| true)) {
            return Err(ReconError::UnbalancedCosting {
                element: element.costing_name.clone(),
                employee,
            });
        }

        let moves = exact_match(element, partition.unreconciled());
        let moved = partition.settle(&moves);
        self.counts.exact += moved;
        if moved > 0 {
            debug!(%employee, element = name, moved, "exact match");
        }

        let moves = zero_impact_reclass(partition.unreconciled());
        let moved = partition.settle(&moves);
        self.counts.reclassified += moved;
        if moved > 0 {
            debug!(%employee, element = name, moved, "zero-impact reclass");
        }

        let moves = combinatorial_match(element, partition.unreconciled());
        let moved = partition.settle(&moves);
        self.counts.combinatorial += moved;
        if moved > 0 {
            debug!(%employee, element = name, moved, "combinatorial match");
        }

        let mut gaps = Vec::new();
        if !partition.is_settled() {
            warn!(%employee, element = name, remaining = partition.unreconciled().len(), "entries left unreconciled");
            gaps.push(ReconciliationGap::unreconciled(employee, name));
        }

        // Every strategy moves balanced groups, so this only fails on a logic defect
        if !is_zero_currency(&costing_sum(partition.reconciled(), |_| true)) {
            return Err(ReconError::UnbalancedReconciled {
                element: name.to_string(),
                employee,
            });
        }

        let diff = payroll_less_debits(element, partition.reconciled());
        if !is_zero_currency(&diff) {
            warn!(%employee, element = name, %diff, "reconciled difference");
            gaps.push(ReconciliationGap::difference(employee, name, diff));
        }

        Ok(gaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn element(name: &str, category: &str) -> Element {
        Element::new(
            name.to_string(),
            format!("{} Costing", name),
            category.to_string(),
            "Earnings".to_string(),
            vec![500000],
            vec![200000],
            true,
        )
        .unwrap()
    }

    fn costing(account: u32, amount: &str) -> Transaction {
        Transaction::costing(1100, 90000, account, dec(amount))
    }

    #[test]
    fn test_strategies_run_in_order() {
        let regular = element("Regular Pay", "Standard Earnings");
        let mut builder = TreeBuilder::new();
        let employee = Employee::new(EmployeeNumber(9), dec("125.00"));
        for transaction in [
            Transaction::payroll(dec("100.00")),
            Transaction::payroll(dec("25.00")),
            costing(500000, "60.00"),
            costing(500000, "40.00"),
            costing(200000, "-100.00"),
            costing(600000, "15.00"),
            costing(600000, "-15.00"),
        ] {
            builder.add(employee.clone(), regular.clone(), transaction);
        }
        let (mut tree, _) = builder.finish();

        let mut reconciler = Reconciler::new();
        let gaps = reconciler.reconcile(&mut tree).unwrap();

        assert_eq!(
            gaps,
            vec![ReconciliationGap::unreconciled(EmployeeNumber(9), "Regular Pay")]
        );
        assert_eq!(
            reconciler.counts(),
            StrategyCounts {
                exact: 0,
                reclassified: 2,
                combinatorial: 4,
            }
        );
        let partition = tree.partition(EmployeeNumber(9), "Regular Pay").unwrap();
        assert_eq!(partition.unreconciled(), &[Transaction::payroll(dec("25.00"))]);
        assert_eq!(partition.reconciled().len(), 6);
    }

    #[test]
    fn test_unbalanced_costing_is_fatal() {
        let mut partition = Partition::new();
        partition.push_unreconciled(costing(500000, "10.00"));
        partition.push_unreconciled(costing(200000, "-9.99"));

        let err = Reconciler::new()
            .reconcile_partition(
                EmployeeNumber(1),
                &element("Regular Pay", "Standard Earnings"),
                &mut partition,
            )
            .unwrap_err();
        assert!(matches!(err, ReconError::UnbalancedCosting { .. }));
        assert_eq!(partition.unreconciled().len(), 2);
    }

    #[test]
    fn test_net_pay_mismatch_is_fatal() {
        let mut builder = TreeBuilder::new();
        builder.add(
            Employee::new(EmployeeNumber(3), dec("90.00")),
            element("Regular Pay", "Standard Earnings"),
            Transaction::payroll(dec("100.00")),
        );
        let (mut tree, _) = builder.finish();

        let err = Reconciler::new().reconcile(&mut tree).unwrap_err();
        match err {
            ReconError::NetPayMismatch {
                employee,
                recomputed,
                recorded,
            } => {
                assert_eq!(employee, EmployeeNumber(3));
                assert_eq!(recomputed, dec("100.00"));
                assert_eq!(recorded, dec("90.00"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_deductions_reduce_net_pay() {
        let mut builder = TreeBuilder::new();
        let employee = Employee::new(EmployeeNumber(3), dec("70.00"));
        builder.add(
            employee.clone(),
            element("Regular Pay", "Standard Earnings"),
            Transaction::payroll(dec("100.00")),
        );
        builder.add(
            employee,
            element("Medical", "Pretax Deductions"),
            Transaction::payroll(dec("30.00")),
        );
        let (mut tree, _) = builder.finish();

        let gaps = Reconciler::new().reconcile(&mut tree).unwrap();
        // Nothing was costed, so both elements are reported
        assert_eq!(gaps.len(), 2);
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let mut partition = Partition::new();
        partition.push_unreconciled(Transaction::payroll(dec("100.00")));
        partition.push_unreconciled(costing(500000, "100.00"));
        partition.push_unreconciled(costing(200000, "-100.00"));

        let regular = element("Regular Pay", "Standard Earnings");
        let mut reconciler = Reconciler::new();
        reconciler
            .reconcile_partition(EmployeeNumber(1), &regular, &mut partition)
            .unwrap();
        let after_first = partition.clone();
        let gaps = reconciler
            .reconcile_partition(EmployeeNumber(1), &regular, &mut partition)
            .unwrap();

        assert!(gaps.is_empty());
        assert_eq!(partition, after_first);
        assert_eq!(reconciler.counts().exact, 3);
    }
}
