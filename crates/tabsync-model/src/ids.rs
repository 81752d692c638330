#![deny(unsafe_code)]

use std::fmt;

use crate::{CellValue, ModelError};

/// The management number identifying one work item across all tables.
///
/// Always trimmed and non-empty; a blank cell has no key at all rather than
/// an empty one.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BusinessKey(String);

impl BusinessKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidKey(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Key carried by a cell, if any. Blank cells yield `None`.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        let text = cell.as_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusinessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the person owning one ledger table, derived from the table name.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EditorName(String);

impl EditorName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidEditor(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Strip the ledger prefix off a table name; `None` when the name does
    /// not belong to a ledger or the remainder is empty.
    pub fn from_table_name(table_name: &str, ledger_prefix: &str) -> Option<Self> {
        let rest = table_name.strip_prefix(ledger_prefix)?;
        let trimmed = rest.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EditorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_key_trims_and_rejects_empty() {
        assert_eq!(BusinessKey::new(" K-001 ").unwrap().as_str(), "K-001");
        assert!(BusinessKey::new("   ").is_err());
    }

    #[test]
    fn key_from_blank_cell_is_none() {
        assert_eq!(BusinessKey::from_cell(&CellValue::Blank), None);
        assert_eq!(BusinessKey::from_cell(&CellValue::text("  ")), None);
        assert_eq!(
            BusinessKey::from_cell(&CellValue::Number(1200.0)).unwrap().as_str(),
            "1200"
        );
    }

    #[test]
    fn editor_name_from_ledger_table() {
        assert_eq!(
            EditorName::from_table_name("Ledger_Tanaka", "Ledger_").unwrap().as_str(),
            "Tanaka"
        );
        assert_eq!(EditorName::from_table_name("Main", "Ledger_"), None);
        assert_eq!(EditorName::from_table_name("Ledger_", "Ledger_"), None);
    }
}
