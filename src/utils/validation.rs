//! Validation utilities for raw source rows

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;
use crate::utils::money::parse_amount;

/// Fetch a trimmed column value from a raw row
pub fn required_field<'a>(row: &'a RawRow, field: &str) -> Result<&'a str, RowError> {
    row.get(field)
        .map(|value| value.trim())
        .ok_or_else(|| RowError::MissingField(field.to_string()))
}

/// Parse an integer column such as an employee, company or account number
pub fn parse_number_field(row: &RawRow, field: &str) -> Result<u32, RowError> {
    let value = required_field(row, field)?;
    value.parse::<u32>().map_err(|_| RowError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parse a monetary column
pub fn parse_amount_field(row: &RawRow, field: &str) -> Result<BigDecimal, RowError> {
    let value = required_field(row, field)?;
    parse_amount(value).ok_or_else(|| RowError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Reject a zero identifier
pub fn validate_non_zero(value: u32, label: &str) -> Result<u32, RowError> {
    if value == 0 {
        Err(RowError::ZeroField(label.to_string()))
    } else {
        Ok(value)
    }
}

/// Check that a source carries every column a schema needs
pub fn has_required_headers<S: AsRef<str>>(headers: &[S], required: &[&str]) -> bool {
    required
        .iter()
        .all(|name| headers.iter().any(|h| h.as_ref().trim() == *name))
}

/// Fail with a structural error naming the first missing column
pub fn validate_headers<S: AsRef<str>>(
    headers: &[S],
    required: &[&str],
    source: &str,
) -> ReconResult<()> {
    for name in required {
        if !headers.iter().any(|h| h.as_ref().trim() == *name) {
            return Err(ReconError::Structural(format!(
                "{} does not contain the required column \"{}\"",
                source, name
            )));
        }
    }
    Ok(())
}
