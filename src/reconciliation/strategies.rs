//! Matching strategies.
//!
//! Each strategy is a pure function of the element and the current
//! unreconciled list. It returns the positions to move, and the caller applies
//! them to the partition in one step.

use bigdecimal::BigDecimal;
use std::collections::{BTreeMap, BTreeSet};

use crate::reconciliation::subset::find_subset;
use crate::tree::partition::{costing_sum, payroll_sum};
use crate::types::*;
use crate::utils::money::{is_zero_currency, sum_rounded, to_cents};

/// Strategy A: the payroll total equals the debit total and mirrors the credit total
pub fn exact_match(element: &Element, unreconciled: &[Transaction]) -> BTreeSet<usize> {
    let pr = payroll_sum(unreconciled);
    let dr = costing_sum(unreconciled, |account| element.is_debit_account(account));
    let cr = costing_sum(unreconciled, |account| element.is_credit_account(account));

    if dr == pr && cr == -pr.clone() {
        (0..unreconciled.len()).collect()
    } else {
        BTreeSet::new()
    }
}

/// Strategy B: per-account costing groups that net to zero have no GL effect
pub fn zero_impact_reclass(unreconciled: &[Transaction]) -> BTreeSet<usize> {
    let mut groups: BTreeMap<u32, Vec<(usize, &BigDecimal)>> = BTreeMap::new();
    for (position, transaction) in unreconciled.iter().enumerate() {
        if let Some(costing) = transaction.as_costing() {
            groups
                .entry(costing.account())
                .or_default()
                .push((position, costing.amount()));
        }
    }

    groups
        .values()
        .filter(|entries| is_zero_currency(&sum_rounded(entries.iter().map(|(_, a)| *a))))
        .flat_map(|entries| entries.iter().map(|(position, _)| *position))
        .collect()
}

/// Strategy C: match each payroll entry to a debit subset and a credit subset.
///
/// Payroll entries are visited in list order. Entries claimed by an earlier
/// match are no longer candidates for later ones.
pub fn combinatorial_match(element: &Element, unreconciled: &[Transaction]) -> BTreeSet<usize> {
    let mut claimed = BTreeSet::new();

    for (position, transaction) in unreconciled.iter().enumerate() {
        if !transaction.is_payroll() {
            continue;
        }
        let Some(target) = to_cents(transaction.amount()) else {
            continue;
        };

        let debits = candidates(unreconciled, &claimed, |a| element.is_debit_account(a));
        let Some(debit_subset) = find_subset(&debits, target) else {
            continue;
        };

        let mut excluded = claimed.clone();
        excluded.extend(debit_subset.iter().copied());
        let credits = candidates(unreconciled, &excluded, |a| element.is_credit_account(a));
        let Some(credit_subset) = find_subset(&credits, target) else {
            continue;
        };

        let net = debits
            .iter()
            .filter(|(p, _)| debit_subset.contains(p))
            .chain(credits.iter().filter(|(p, _)| credit_subset.contains(p)))
            .try_fold(0i64, |acc, (_, cents)| acc.checked_add(*cents));
        if net != Some(0) {
            continue;
        }

        claimed.insert(position);
        claimed.extend(debit_subset);
        claimed.extend(credit_subset);
    }

    claimed
}

/// Unclaimed costing entries whose account passes `accepts`, as `(position, cents)`
fn candidates<F>(
    unreconciled: &[Transaction],
    claimed: &BTreeSet<usize>,
    accepts: F,
) -> Vec<(usize, i64)>
where
    F: Fn(u32) -> bool,
{
    unreconciled
        .iter()
        .enumerate()
        .filter(|(position, _)| !claimed.contains(position))
        .filter_map(|(position, t)| t.as_costing().map(|c| (position, c)))
        .filter(|(_, c)| accepts(c.account()))
        .filter_map(|(position, c)| to_cents(c.amount()).map(|cents| (position, cents)))
        .collect()
}
