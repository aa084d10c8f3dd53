//! # Payroll Recon
//!
//! Reconciles a payroll register against general-ledger costing, employee by
//! employee and pay element by pay element, and produces the reports needed
//! to correct whatever does not match.
//!
//! ## Features
//!
//! - **Source parsing**: element lookup table, payroll register and costing CSV files
//! - **Reconciliation tree**: employee → element → reconciled/unreconciled partitions
//! - **Matching strategies**: exact match, zero-impact reclass and a bounded subset search
//! - **Integrity checks**: net pay recomputation and balanced costing before and after matching
//! - **Reporting**: summary, correcting journal entries, unreconciled detail and gap list
//!
//! ## Quick Start
//!
//! ```rust
//! use payroll_recon::{reconcile_sources, ElementTable, SourceReader};
//!
//! let elements = ElementTable::from_reader(
//!     "Payroll Name,Costing Name,Payroll Category,Costing Category,Debit Account,Credit Account\n\
//!      Regular Pay,Regular Earnings,Standard Earnings,Earnings,500000,200000\n"
//!         .as_bytes(),
//! )
//! .unwrap();
//! let register = "Person Number,Net Pay,Balance Name,Balance Category,Current\n\
//!                 1001,100.00,Regular Pay,Standard Earnings,100.00\n";
//! let costing = "Employee Number,Element,Company_PC,Department_PC,Account_PC,Debit Amount,Credit Amount,Unit of Measure\n\
//!                1001,Regular Earnings,1100,90000,500000,100.00,0,Money\n\
//!                1001,Regular Earnings,1100,90000,200000,0,100.00,Money\n";
//!
//! let result = reconcile_sources(
//!     &elements,
//!     &SourceReader::default(),
//!     [("register.csv", register.as_bytes()), ("costing.csv", costing.as_bytes())],
//! )
//! .unwrap();
//! assert!(result.gaps.is_empty());
//! ```

pub mod config;
pub mod reconciliation;
pub mod reporting;
pub mod run;
pub mod sources;
pub mod traits;
pub mod tree;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::RunConfig;
pub use reconciliation::{GapKind, ReconciliationGap, Reconciler, StrategyCounts};
pub use reporting::{Cell, ReportTable, Reports};
pub use run::*;
pub use sources::{ElementTable, NameSubstitutions, SourceKind, SourceReader};
pub use traits::*;
pub use tree::{Partition, ReconciliationTree, TreeBuilder};
pub use types::*;
