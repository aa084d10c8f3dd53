//! The reconciliation tree: employee → element → partition

use std::collections::BTreeMap;

use crate::tree::Partition;
use crate::types::*;

/// One employee and the partitions of every element they were paid or costed
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeBranch {
    pub employee: Employee,
    pub(crate) partitions: BTreeMap<String, Partition>,
}

impl EmployeeBranch {
    fn new(employee: Employee) -> Self {
        Self {
            employee,
            partitions: BTreeMap::new(),
        }
    }

    /// Partitions keyed by payroll name, in name order
    pub fn partitions(&self) -> impl Iterator<Item = (&str, &Partition)> {
        self.partitions.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Partition for a single element
    pub fn partition(&self, payroll_name: &str) -> Option<&Partition> {
        self.partitions.get(payroll_name)
    }
}

/// Central structure shared by the builder, reconciler and reports.
///
/// Keys are fixed once the builder finishes; only partition contents change
/// afterwards. Iteration is ordered by employee number, then payroll name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationTree {
    pub(crate) branches: BTreeMap<EmployeeNumber, EmployeeBranch>,
    pub(crate) elements: BTreeMap<String, Element>,
}

impl ReconciliationTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct employees
    pub fn employee_count(&self) -> usize {
        self.branches.len()
    }

    /// Number of (employee, element) partitions
    pub fn partition_count(&self) -> usize {
        self.branches.values().map(|b| b.partitions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Employee branches in employee-number order
    pub fn branches(&self) -> impl Iterator<Item = &EmployeeBranch> {
        self.branches.values()
    }

    pub fn branch(&self, number: EmployeeNumber) -> Option<&EmployeeBranch> {
        self.branches.get(&number)
    }

    /// Partition for an (employee, element) pair
    pub fn partition(&self, number: EmployeeNumber, payroll_name: &str) -> Option<&Partition> {
        self.branches
            .get(&number)
            .and_then(|b| b.partitions.get(payroll_name))
    }

    /// Every element that appears in the tree, keyed by payroll name
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn element(&self, payroll_name: &str) -> Option<&Element> {
        self.elements.get(payroll_name)
    }

    /// Every partition together with its employee and element
    pub fn iter_partitions(&self) -> impl Iterator<Item = (&Employee, &Element, &Partition)> {
        self.branches.values().flat_map(move |branch| {
            branch.partitions.iter().filter_map(move |(name, partition)| {
                self.elements
                    .get(name)
                    .map(|element| (&branch.employee, element, partition))
            })
        })
    }

    /// Add an unreconciled transaction, merging the employee if already present.
    ///
    /// Returns the employee record held by the tree after the merge.
    pub(crate) fn insert(
        &mut self,
        employee: Employee,
        element: Element,
        transaction: Transaction,
    ) -> &Employee {
        let branch = self
            .branches
            .entry(employee.number)
            .and_modify(|existing| existing.employee.merge(&employee))
            .or_insert_with(|| EmployeeBranch::new(employee));

        branch
            .partitions
            .entry(element.payroll_name.clone())
            .or_default()
            .push_unreconciled(transaction);

        self.elements
            .entry(element.payroll_name.clone())
            .or_insert(element);

        &branch.employee
    }
}
