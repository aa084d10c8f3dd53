//! Uniform tabular output

use bigdecimal::BigDecimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::money::{round_currency, sum_rounded};

/// A single value in a report row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(u32),
    Amount(BigDecimal),
}

impl Cell {
    pub fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    /// Amount cell, rounded to cents
    pub fn amount(value: &BigDecimal) -> Self {
        Cell::Amount(round_currency(value))
    }

    pub fn as_amount(&self) -> Option<&BigDecimal> {
        match self {
            Cell::Amount(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(value) => write!(f, "{}", value),
            Cell::Integer(value) => write!(f, "{}", value),
            Cell::Amount(value) => write!(f, "{}", value),
        }
    }
}

/// One row, keyed by column name
pub type Row = BTreeMap<String, Cell>;

/// A report: fixed column order plus rows that share those keys
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ReportTable {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `index`
    pub fn cell(&self, index: usize, column: &str) -> Option<&Cell> {
        self.rows.get(index).and_then(|row| row.get(column))
    }

    /// Rounded sum of every amount in `column`
    pub fn column_total(&self, column: &str) -> BigDecimal {
        sum_rounded(
            self.rows
                .iter()
                .filter_map(|row| row.get(column))
                .filter_map(Cell::as_amount),
        )
    }

    /// Row values in column order, with empty strings for missing cells
    pub fn ordered_values(&self, row: &Row) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| row.get(c).map(|cell| cell.to_string()).unwrap_or_default())
            .collect()
    }
}
