//! Element lookup table

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::types::*;
use crate::utils::validation::validate_headers;

/// Columns every element lookup file must carry
pub const ELEMENT_COLUMNS: &[&str] = &[
    "Costing Category",
    "Costing Name",
    "Payroll Category",
    "Payroll Name",
    "Debit Account",
    "Credit Account",
];

/// Elements indexed by payroll name and, independently, by costing name
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    by_payroll_name: HashMap<String, Element>,
    costing_index: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ElementRecord {
    #[serde(rename = "Payroll Name")]
    payroll_name: String,
    #[serde(rename = "Costing Name")]
    costing_name: String,
    #[serde(rename = "Payroll Category")]
    payroll_category: String,
    #[serde(rename = "Costing Category")]
    costing_category: String,
    #[serde(rename = "Debit Account")]
    debit_account: String,
    #[serde(rename = "Credit Account")]
    credit_account: String,
    #[serde(rename = "Should Cost", default)]
    should_cost: Option<String>,
}

impl ElementRecord {
    fn into_element(self) -> ReconResult<Element> {
        let debit_accounts = parse_accounts(&self.debit_account, &self.payroll_name)?;
        let credit_accounts = parse_accounts(&self.credit_account, &self.payroll_name)?;
        // Without the column every element is costed
        let should_cost = self
            .should_cost
            .as_deref()
            .is_none_or(|flag| flag.trim() == "TRUE");

        Element::new(
            self.payroll_name.trim().to_string(),
            self.costing_name.trim().to_string(),
            self.payroll_category.trim().to_string(),
            self.costing_category.trim().to_string(),
            debit_accounts,
            credit_accounts,
            should_cost,
        )
    }
}

/// Parse a `;`-separated account list
fn parse_accounts(raw: &str, element: &str) -> ReconResult<Vec<u32>> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>().map_err(|_| {
                ReconError::Structural(format!(
                    "Element \"{}\" has an invalid account number \"{}\"",
                    element, part
                ))
            })
        })
        .collect()
}

impl ElementTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element, replacing any previous element with the same payroll name
    pub fn add(&mut self, element: Element) {
        self.costing_index
            .insert(element.costing_name.clone(), element.payroll_name.clone());
        self.by_payroll_name
            .insert(element.payroll_name.clone(), element);
    }

    pub fn find_by_payroll_name(&self, name: &str) -> Option<&Element> {
        self.by_payroll_name.get(name)
    }

    pub fn find_by_costing_name(&self, name: &str) -> Option<&Element> {
        self.costing_index
            .get(name)
            .and_then(|payroll_name| self.by_payroll_name.get(payroll_name))
    }

    /// Look up by payroll name first, then by costing name
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.find_by_payroll_name(name)
            .or_else(|| self.find_by_costing_name(name))
    }

    pub fn len(&self) -> usize {
        self.by_payroll_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_payroll_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.by_payroll_name.values()
    }

    /// Parse an element lookup table from CSV
    pub fn from_reader<R: Read>(reader: R) -> ReconResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        validate_headers(&headers, ELEMENT_COLUMNS, "Elements input file")?;

        let mut table = Self::new();
        for record in reader.deserialize::<ElementRecord>() {
            table.add(record?.into_element()?);
        }
        Ok(table)
    }

    /// Load an element lookup table from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> ReconResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ReconError::Io(format!("{}: {}", path.display(), e)))?;
        let table = Self::from_reader(file)?;
        info!(elements = table.len(), path = %path.display(), "loaded element lookup table");
        Ok(table)
    }
}

impl FromIterator<Element> for ElementTable {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut table = Self::new();
        for element in iter {
            table.add(element);
        }
        table
    }
}
