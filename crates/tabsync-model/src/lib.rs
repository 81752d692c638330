pub mod cell;
pub mod error;
pub mod ids;
pub mod layout;
pub mod progress;
pub mod record;
pub mod table;

pub use cell::CellValue;
pub use error::{ModelError, Result};
pub use ids::{BusinessKey, EditorName};
pub use layout::{LedgerLayout, MainLayout, MasterLayout, ScheduleLayout, WorkbookConfig};
pub use progress::Progress;
pub use record::{LedgerProgressView, MainProgressView, MasterRecord};
pub use table::{Row, TableSnapshot};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes() {
        let table = TableSnapshot::with_rows(
            "Main",
            vec![vec![CellValue::text("K-001"), CellValue::Number(3.0)]],
        );
        let json = serde_json::to_string(&table).expect("serialize snapshot");
        let round: TableSnapshot = serde_json::from_str(&json).expect("deserialize snapshot");
        assert_eq!(round, table);
    }

    #[test]
    fn progress_serializes_as_plain_string() {
        let json = serde_json::to_string(&Progress::Duplicate).expect("serialize progress");
        assert_eq!(json, "\"Duplicate\"");
        let round: Progress = serde_json::from_str(&json).expect("deserialize progress");
        assert_eq!(round, Progress::Duplicate);
    }
}
