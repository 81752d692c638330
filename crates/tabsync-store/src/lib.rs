pub mod calendar;
pub mod csv_dir;
pub mod document;
pub mod error;
pub mod memory;
pub mod tabular;

pub use calendar::{CalendarEvent, CalendarLookup, FixedCalendar, holiday_set};
pub use csv_dir::{load_workbook, save_workbook};
pub use document::{DocumentStore, FileHandle, FileId, FolderId, MemoryDocumentStore};
pub use error::{Result, StoreError};
pub use memory::{MemoryWorkbook, Sheet};
pub use tabular::{BackgroundGrid, TabularStore};
