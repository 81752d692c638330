//! Table names and column layouts for the three table kinds.
//!
//! Layouts are configuration, not constants: a `WorkbookConfig` can be
//! loaded from JSON to match a workbook whose columns were rearranged,
//! while `Default` matches the canonical workbook.

use serde::{Deserialize, Serialize};

/// Column positions of the master table (authoritative descriptive data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterLayout {
    pub key: usize,
    pub machine_no: usize,
    pub model: usize,
    pub doc_url: usize,
    pub doc_label: usize,
    pub destination: usize,
    pub planned_hours: usize,
    pub deadline: usize,
    pub progress: usize,
}

impl Default for MasterLayout {
    fn default() -> Self {
        Self {
            key: 0,
            machine_no: 1,
            model: 2,
            doc_url: 3,
            doc_label: 4,
            destination: 5,
            planned_hours: 6,
            deadline: 7,
            progress: 8,
        }
    }
}

/// Column positions of the main (aggregation) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainLayout {
    pub key: usize,
    pub reference_key: usize,
    pub machine_no: usize,
    pub model: usize,
    pub destination: usize,
    pub inquiry: usize,
    pub temp_code: usize,
    pub assignee: usize,
    pub planned_hours: usize,
    pub total_labor: usize,
    pub deadline: usize,
    pub progress: usize,
    pub progress_editor: usize,
    pub last_update: usize,
    pub completion_date: usize,
    pub assembly_start: usize,
    pub remarks: usize,
}

impl MainLayout {
    /// Columns the projector must carry over from the existing row: the
    /// operator-entered fields plus everything derived outside the master.
    pub fn preserved_columns(&self) -> Vec<usize> {
        vec![
            self.reference_key,
            self.inquiry,
            self.temp_code,
            self.assignee,
            self.total_labor,
            self.progress_editor,
            self.last_update,
            self.completion_date,
            self.assembly_start,
            self.remarks,
        ]
    }

    pub fn width(&self) -> usize {
        self.remarks + 1
    }
}

impl Default for MainLayout {
    fn default() -> Self {
        Self {
            key: 0,
            reference_key: 1,
            machine_no: 2,
            model: 3,
            destination: 4,
            inquiry: 5,
            temp_code: 6,
            assignee: 7,
            planned_hours: 8,
            total_labor: 9,
            deadline: 10,
            progress: 11,
            progress_editor: 12,
            last_update: 13,
            completion_date: 14,
            assembly_start: 15,
            remarks: 16,
        }
    }
}

/// Column positions of a per-editor ledger. Daily labor columns start at
/// `first_day_col` and extend open-endedly to the right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerLayout {
    pub key: usize,
    pub machine_no: usize,
    pub model: usize,
    pub assignee: usize,
    pub inquiry: usize,
    pub deadline: usize,
    pub progress: usize,
    pub last_update: usize,
    pub planned_hours: usize,
    pub total_labor: usize,
    pub first_day_col: usize,
}

impl Default for LedgerLayout {
    fn default() -> Self {
        Self {
            key: 0,
            machine_no: 1,
            model: 2,
            assignee: 3,
            inquiry: 4,
            deadline: 5,
            progress: 6,
            last_update: 7,
            planned_hours: 8,
            total_labor: 9,
            first_day_col: 10,
        }
    }
}

/// Column positions of the external production-schedule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleLayout {
    pub machine_no: usize,
    pub assembly_start: usize,
}

impl Default for ScheduleLayout {
    fn default() -> Self {
        Self {
            machine_no: 0,
            assembly_start: 1,
        }
    }
}

/// Names, prefixes and layouts describing one workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    pub master_table: String,
    pub main_table: String,
    pub schedule_table: String,
    /// Ledger tables share this prefix; the remainder is the editor name.
    pub ledger_prefix: String,
    /// Header rows above the body in every table.
    pub header_rows: usize,
    pub master: MasterLayout,
    pub main: MainLayout,
    pub ledger: LedgerLayout,
    pub schedule: ScheduleLayout,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            master_table: "Master".to_string(),
            main_table: "Main".to_string(),
            schedule_table: "Schedule".to_string(),
            ledger_prefix: "Ledger_".to_string(),
            header_rows: 1,
            master: MasterLayout::default(),
            main: MainLayout::default(),
            ledger: LedgerLayout::default(),
            schedule: ScheduleLayout::default(),
        }
    }
}

impl WorkbookConfig {
    pub fn is_ledger_table(&self, table_name: &str) -> bool {
        table_name.starts_with(&self.ledger_prefix) && table_name.len() > self.ledger_prefix.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_from_empty_json() {
        let config: WorkbookConfig = serde_json::from_str("{}").expect("parse config");
        assert_eq!(config, WorkbookConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config: WorkbookConfig =
            serde_json::from_str(r#"{"ledger_prefix": "WL-", "header_rows": 2}"#)
                .expect("parse config");
        assert_eq!(config.ledger_prefix, "WL-");
        assert_eq!(config.header_rows, 2);
        assert_eq!(config.main_table, "Main");
    }

    #[test]
    fn ledger_table_detection() {
        let config = WorkbookConfig::default();
        assert!(config.is_ledger_table("Ledger_Sato"));
        assert!(!config.is_ledger_table("Ledger_"));
        assert!(!config.is_ledger_table("Main"));
    }
}
