//! Populates a reconciliation tree from row outcomes

use tracing::{debug, warn};

use crate::traits::*;
use crate::tree::ReconciliationTree;
use crate::types::*;

/// Accumulates transactions into a [`ReconciliationTree`].
///
/// Row failures are recorded as text and never stop the batch.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: ReconciliationTree,
    errors: Vec<String>,
    skipped: usize,
}

impl TreeBuilder {
    /// Create a builder with an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one transaction to the unreconciled side of its partition
    pub fn add(&mut self, employee: Employee, element: Element, transaction: Transaction) {
        let merged = self.tree.insert(employee, element, transaction);
        debug!(employee = %merged.number, "added unreconciled transaction");
    }

    /// Apply a single row outcome
    pub fn ingest(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Entry {
                employee,
                element,
                transaction,
            } => self.add(employee, element, transaction),
            RowOutcome::Skip => self.skipped += 1,
            RowOutcome::Failed(err) => {
                warn!(error = %err, "row rejected");
                self.errors.push(err.to_string());
            }
        }
    }

    /// Apply a stream of row outcomes
    pub fn ingest_all<I>(&mut self, outcomes: I)
    where
        I: IntoIterator<Item = RowOutcome>,
    {
        for outcome in outcomes {
            self.ingest(outcome);
        }
    }

    /// Record a failure that happened before a row could be interpreted
    pub fn record_error(&mut self, message: String) {
        warn!(error = %message, "row rejected");
        self.errors.push(message);
    }

    /// Row errors collected so far
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Number of rows skipped as not applicable
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn tree(&self) -> &ReconciliationTree {
        &self.tree
    }

    /// Finish building and hand over the tree with the accumulated row errors
    pub fn finish(self) -> (ReconciliationTree, Vec<String>) {
        (self.tree, self.errors)
    }
}
