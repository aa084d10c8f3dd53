//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::utils::money::{round_currency, sum_rounded};

/// Typed employee key. Never zero once accepted by a row builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeNumber(pub u32);

impl fmt::Display for EmployeeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An employee and every distinct net pay reported for them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee number, the identity of the record
    pub number: EmployeeNumber,
    /// Distinct net-pay values, rounded to cents
    net_pays: BTreeSet<BigDecimal>,
}

impl Employee {
    /// Create an employee with a single observed net pay
    pub fn new(number: EmployeeNumber, net_pay: BigDecimal) -> Self {
        let mut net_pays = BTreeSet::new();
        net_pays.insert(round_currency(&net_pay));
        Self { number, net_pays }
    }

    /// Create an employee seen only on the costing feed (net pay of zero)
    pub fn without_net_pay(number: EmployeeNumber) -> Self {
        Self::new(number, BigDecimal::from(0))
    }

    /// Union another record's net pays into this one.
    ///
    /// The same net pay appears on every register row of an employee, so the
    /// values are deduplicated rather than accumulated.
    pub fn merge(&mut self, other: &Employee) {
        self.net_pays.extend(other.net_pays.iter().cloned());
    }

    /// Distinct net pays observed so far
    pub fn net_pays(&self) -> impl Iterator<Item = &BigDecimal> {
        self.net_pays.iter()
    }

    /// Sum of the distinct net pays, rounded to cents
    pub fn total_net_pay(&self) -> BigDecimal {
        sum_rounded(self.net_pays.iter())
    }
}

/// Payroll categories that participate in the net pay recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayrollCategory {
    StandardEarnings,
    SupplementalEarnings,
    EmployeeTaxDeductions,
    InvoluntaryDeductions,
    PretaxDeductions,
    VoluntaryDeductions,
}

impl PayrollCategory {
    pub const ALL: [PayrollCategory; 6] = [
        PayrollCategory::StandardEarnings,
        PayrollCategory::SupplementalEarnings,
        PayrollCategory::EmployeeTaxDeductions,
        PayrollCategory::InvoluntaryDeductions,
        PayrollCategory::PretaxDeductions,
        PayrollCategory::VoluntaryDeductions,
    ];

    /// Parse the label used on the payroll register
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Standard Earnings" => Some(PayrollCategory::StandardEarnings),
            "Supplemental Earnings" => Some(PayrollCategory::SupplementalEarnings),
            "Employee Tax Deductions" => Some(PayrollCategory::EmployeeTaxDeductions),
            "Involuntary Deductions" => Some(PayrollCategory::InvoluntaryDeductions),
            "Pretax Deductions" => Some(PayrollCategory::PretaxDeductions),
            "Voluntary Deductions" => Some(PayrollCategory::VoluntaryDeductions),
            _ => None,
        }
    }

    /// Earnings add to net pay, deductions subtract from it
    pub fn is_earning(&self) -> bool {
        matches!(
            self,
            PayrollCategory::StandardEarnings | PayrollCategory::SupplementalEarnings
        )
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            PayrollCategory::StandardEarnings => 0,
            PayrollCategory::SupplementalEarnings => 1,
            PayrollCategory::EmployeeTaxDeductions => 2,
            PayrollCategory::InvoluntaryDeductions => 3,
            PayrollCategory::PretaxDeductions => 4,
            PayrollCategory::VoluntaryDeductions => 5,
        }
    }
}

/// Static descriptor of a pay component and the GL accounts it posts to.
///
/// Both account lists are non-empty; deserialisation goes through
/// [`Element::new`] so the check cannot be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ElementFields")]
pub struct Element {
    /// Name on the payroll register, the element key
    pub payroll_name: String,
    /// Name on the costing feed
    pub costing_name: String,
    /// Category label on the payroll register
    pub payroll_category: String,
    /// Category label on the costing feed
    pub costing_category: String,
    debit_accounts: Vec<u32>,
    credit_accounts: Vec<u32>,
    /// Whether the element is expected to reach the GL at all
    pub should_cost: bool,
}

#[derive(Deserialize)]
struct ElementFields {
    payroll_name: String,
    costing_name: String,
    payroll_category: String,
    costing_category: String,
    debit_accounts: Vec<u32>,
    credit_accounts: Vec<u32>,
    should_cost: bool,
}

impl TryFrom<ElementFields> for Element {
    type Error = ReconError;

    fn try_from(fields: ElementFields) -> ReconResult<Self> {
        Element::new(
            fields.payroll_name,
            fields.costing_name,
            fields.payroll_category,
            fields.costing_category,
            fields.debit_accounts,
            fields.credit_accounts,
            fields.should_cost,
        )
    }
}

impl Element {
    /// Create an element, rejecting empty account lists
    pub fn new(
        payroll_name: String,
        costing_name: String,
        payroll_category: String,
        costing_category: String,
        debit_accounts: Vec<u32>,
        credit_accounts: Vec<u32>,
        should_cost: bool,
    ) -> ReconResult<Self> {
        if debit_accounts.is_empty() || credit_accounts.is_empty() {
            return Err(ReconError::Structural(format!(
                "Element \"{}\" must have at least one debit and one credit account",
                payroll_name
            )));
        }

        Ok(Self {
            payroll_name,
            costing_name,
            payroll_category,
            costing_category,
            debit_accounts,
            credit_accounts,
            should_cost,
        })
    }

    /// Debit accounts, in priority order
    pub fn debit_accounts(&self) -> &[u32] {
        &self.debit_accounts
    }

    /// Credit accounts, in priority order
    pub fn credit_accounts(&self) -> &[u32] {
        &self.credit_accounts
    }

    pub fn is_debit_account(&self, account: u32) -> bool {
        self.debit_accounts.contains(&account)
    }

    pub fn is_credit_account(&self, account: u32) -> bool {
        self.credit_accounts.contains(&account)
    }

    /// Whether the account is mapped to this element on either side
    pub fn posts_to(&self, account: u32) -> bool {
        self.is_debit_account(account) || self.is_credit_account(account)
    }

    /// First debit account, the target of correcting postings
    pub fn primary_debit_account(&self) -> u32 {
        self.debit_accounts[0]
    }

    /// First credit account, the target of correcting postings
    pub fn primary_credit_account(&self) -> u32 {
        self.credit_accounts[0]
    }

    /// Recognized payroll category, if any
    pub fn category(&self) -> Option<PayrollCategory> {
        PayrollCategory::from_label(&self.payroll_category)
    }
}

/// Amount reported on the payroll register
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollEntry {
    amount: BigDecimal,
}

/// Posting on the general-ledger costing feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostingEntry {
    company: u32,
    department: u32,
    account: u32,
    amount: BigDecimal,
}

impl PayrollEntry {
    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }
}

impl CostingEntry {
    pub fn company(&self) -> u32 {
        self.company
    }

    pub fn department(&self) -> u32 {
        self.department
    }

    pub fn account(&self) -> u32 {
        self.account
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }
}

/// Immutable monetary record from either source.
///
/// Amounts are rounded to cents on construction and never re-rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Transaction {
    Payroll(PayrollEntry),
    Costing(CostingEntry),
}

impl Transaction {
    /// Create a payroll register transaction
    pub fn payroll(amount: BigDecimal) -> Self {
        Transaction::Payroll(PayrollEntry {
            amount: round_currency(&amount),
        })
    }

    /// Create a costing transaction
    pub fn costing(company: u32, department: u32, account: u32, amount: BigDecimal) -> Self {
        Transaction::Costing(CostingEntry {
            company,
            department,
            account,
            amount: round_currency(&amount),
        })
    }

    pub fn amount(&self) -> &BigDecimal {
        match self {
            Transaction::Payroll(entry) => &entry.amount,
            Transaction::Costing(entry) => &entry.amount,
        }
    }

    pub fn is_payroll(&self) -> bool {
        matches!(self, Transaction::Payroll(_))
    }

    pub fn as_costing(&self) -> Option<&CostingEntry> {
        match self {
            Transaction::Costing(entry) => Some(entry),
            Transaction::Payroll(_) => None,
        }
    }

    /// GL account of a costing transaction
    pub fn account(&self) -> Option<u32> {
        self.as_costing().map(|c| c.account)
    }
}

/// Per-row failure raised while turning a raw source row into a transaction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("Column \"{field}\" has an invalid value \"{value}\"")]
    InvalidField { field: String, value: String },
    #[error("Column \"{0}\" is missing from the row")]
    MissingField(String),
    #[error("{0} can not be zero")]
    ZeroField(String),
    #[error("{name} on the {origin} does not exist in the element lookup table")]
    UnknownElement { origin: String, name: String },
    #[error("{account} for element {element} does not exist in the element lookup table")]
    UnmappedAccount { account: u32, element: String },
}

/// Fatal errors that abort a reconciliation run
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Structural error: {0}")]
    Structural(String),
    #[error("Unreconciled debits do not equal unreconciled credits for \"{element}\" for employee {employee}")]
    UnbalancedCosting {
        element: String,
        employee: EmployeeNumber,
    },
    #[error("Net pay does not recalculate for employee {employee}: recomputed {recomputed}, recorded {recorded}")]
    NetPayMismatch {
        employee: EmployeeNumber,
        recomputed: BigDecimal,
        recorded: BigDecimal,
    },
    #[error("Reconciled debits do not equal reconciled credits for \"{element}\" for employee {employee}")]
    UnbalancedReconciled {
        element: String,
        employee: EmployeeNumber,
    },
    #[error("Unable to calculate a balanced correcting entry for \"{element}\" for employee {employee}")]
    UnbalancedCorrection {
        element: String,
        employee: EmployeeNumber,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for ReconError {
    fn from(err: std::io::Error) -> Self {
        ReconError::Io(err.to_string())
    }
}

impl From<csv::Error> for ReconError {
    fn from(err: csv::Error) -> Self {
        ReconError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for ReconError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::Config(err.to_string())
    }
}

/// Result type for reconciliation operations
pub type ReconResult<T> = Result<T, ReconError>;
