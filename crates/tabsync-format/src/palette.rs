//! Color palette keyed by status. Colors are `#rrggbb` strings as the
//! host spreadsheet expects them.

use tabsync_model::Progress;

pub const COLOR_IN_PROGRESS: &str = "#fff2cc";
pub const COLOR_DONE: &str = "#d9ead3";
pub const COLOR_DUPLICATE: &str = "#f4cccc";
pub const COLOR_ORPHAN: &str = "#cccccc";
pub const COLOR_NON_WORKDAY: &str = "#efefef";

/// Row background for a status; `None` leaves the row unstyled.
pub fn status_color(progress: &Progress) -> Option<&'static str> {
    match progress {
        Progress::NotStarted => None,
        Progress::InProgress => Some(COLOR_IN_PROGRESS),
        Progress::Done => Some(COLOR_DONE),
        Progress::Duplicate => Some(COLOR_DUPLICATE),
        Progress::Custom(_) => None,
    }
}
