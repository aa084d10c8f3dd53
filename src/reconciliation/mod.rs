//! Reconciliation engine for payroll register against GL costing
//!
//! Each (employee, element) partition goes through three strategies in a
//! fixed order: exact match, zero-impact reclassification, and a bounded
//! combinatorial match. Balance invariants are checked before and after.

pub mod engine;
pub mod gap;
pub mod net_pay;
pub mod strategies;
pub mod subset;

pub use engine::*;
pub use gap::*;
pub use net_pay::*;
pub use subset::{find_subset, MAX_CANDIDATES};
