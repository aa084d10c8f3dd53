//! Reconciled / unreconciled split for one employee and element

use bigdecimal::BigDecimal;
use std::collections::BTreeSet;

use crate::types::*;
use crate::utils::money::{round_currency, sum_rounded};

/// Transactions of one (employee, element) pair.
///
/// A transaction sits in exactly one of the two lists. Moves only go from
/// `unreconciled` to `reconciled`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    reconciled: Vec<Transaction>,
    unreconciled: Vec<Transaction>,
}

impl Partition {
    /// Create an empty partition
    pub fn new() -> Self {
        Self::default()
    }

    /// Transactions already matched
    pub fn reconciled(&self) -> &[Transaction] {
        &self.reconciled
    }

    /// Transactions still awaiting a match
    pub fn unreconciled(&self) -> &[Transaction] {
        &self.unreconciled
    }

    /// Whether nothing is left to reconcile
    pub fn is_settled(&self) -> bool {
        self.unreconciled.is_empty()
    }

    /// Every transaction, reconciled first
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.reconciled.iter().chain(self.unreconciled.iter())
    }

    pub(crate) fn push_unreconciled(&mut self, transaction: Transaction) {
        self.unreconciled.push(transaction);
    }

    /// Move the unreconciled transactions at `positions` to the reconciled side.
    ///
    /// Moved transactions keep their relative order; out-of-range positions
    /// are ignored. Returns the number of transactions moved.
    pub fn settle(&mut self, positions: &BTreeSet<usize>) -> usize {
        if positions.is_empty() {
            return 0;
        }

        let mut remaining = Vec::with_capacity(self.unreconciled.len());
        let mut moved = 0;
        for (index, transaction) in std::mem::take(&mut self.unreconciled).into_iter().enumerate() {
            if positions.contains(&index) {
                self.reconciled.push(transaction);
                moved += 1;
            } else {
                remaining.push(transaction);
            }
        }
        self.unreconciled = remaining;
        moved
    }

    /// Move every unreconciled transaction to the reconciled side
    pub fn settle_all(&mut self) -> usize {
        let moved = self.unreconciled.len();
        self.reconciled.append(&mut self.unreconciled);
        moved
    }
}

/// A partition with every transaction unreconciled
impl FromIterator<Transaction> for Partition {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            reconciled: Vec::new(),
            unreconciled: iter.into_iter().collect(),
        }
    }
}

/// Rounded sum of the payroll amounts in `transactions`
pub fn payroll_sum<'a, I>(transactions: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    sum_rounded(
        transactions
            .into_iter()
            .filter(|t| t.is_payroll())
            .map(|t| t.amount()),
    )
}

/// Rounded sum of the costing amounts whose account satisfies `accepts`
pub fn costing_sum<'a, I, F>(transactions: I, accepts: F) -> BigDecimal
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(u32) -> bool,
{
    sum_rounded(
        transactions
            .into_iter()
            .filter_map(|t| t.as_costing())
            .filter(|c| accepts(c.account()))
            .map(|c| c.amount()),
    )
}

/// Payroll total less the costing posted to the element's debit accounts.
///
/// Both the summary "Difference" column and the post-reconciliation gap
/// amount go through here so they round at the same points.
pub fn payroll_less_debits<'a, I>(element: &Element, transactions: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a Transaction> + Clone,
{
    let payroll = payroll_sum(transactions.clone());
    let debits = costing_sum(transactions, |account| element.is_debit_account(account));
    round_currency(&(payroll - debits))
}
