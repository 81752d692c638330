//! Status values shared by the master, main and ledger tables.
//!
//! The duplicate sentinel is defined once here; the resolver, the
//! reconciler and the formatter all reference this enum rather than
//! hard-coding the string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CellValue;

/// Progress of one work item.
///
/// Parsing never fails: unrecognized values are carried through as
/// `Custom` so operator-invented statuses survive every sync round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Progress {
    /// Work not yet begun. Default for blank or absent statuses.
    NotStarted,
    /// Drawing work underway.
    InProgress,
    /// Terminal: drawing issued. Triggers completion-date stamping.
    Done,
    /// Sentinel: this row's key collides with an earlier row.
    Duplicate,
    /// Operator-defined status carried through verbatim.
    Custom(String),
}

impl Progress {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "not started" => Progress::NotStarted,
            "in progress" => Progress::InProgress,
            "done" => Progress::Done,
            "duplicate" => Progress::Duplicate,
            _ => Progress::Custom(value.trim().to_string()),
        }
    }

    /// Status carried by a cell; `None` when the cell is blank.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        if cell.is_blank() {
            None
        } else {
            Some(Self::parse(&cell.as_text()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Progress::NotStarted => "Not started",
            Progress::InProgress => "In progress",
            Progress::Done => "Done",
            Progress::Duplicate => "Duplicate",
            Progress::Custom(value) => value,
        }
    }

    pub fn to_cell(&self) -> CellValue {
        CellValue::Text(self.as_str().to_string())
    }

    /// Terminal statuses get a completion date stamped by the sweep.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Progress::Done)
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Progress::Duplicate)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Progress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Progress::parse(&value))
    }
}
