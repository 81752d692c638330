pub mod backgrounds;
pub mod number_format;
pub mod palette;

pub use backgrounds::{
    BackgroundGrid, is_non_workday, ledger_backgrounds, main_backgrounds,
};
pub use number_format::{DATE_PATTERN, HOURS_PATTERN, TIMESTAMP_PATTERN};
pub use palette::{
    COLOR_DONE, COLOR_DUPLICATE, COLOR_IN_PROGRESS, COLOR_NON_WORKDAY, COLOR_ORPHAN, status_color,
};
