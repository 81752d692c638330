//! Calendar seam: the engine only needs a holiday-date set for shading.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub title: String,
}

pub trait CalendarLookup {
    fn events_in_range(
        &self,
        calendar_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>>;
}

/// Collapse calendar events into the set of holiday dates in the range.
pub fn holiday_set(
    calendar: &dyn CalendarLookup,
    calendar_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeSet<NaiveDate>> {
    let events = calendar.events_in_range(calendar_id, start, end)?;
    Ok(events.into_iter().map(|event| event.date).collect())
}

/// Calendar backed by a fixed event list (tests, offline runs).
#[derive(Debug, Clone, Default)]
pub struct FixedCalendar {
    pub events: Vec<CalendarEvent>,
}

impl CalendarLookup for FixedCalendar {
    fn events_in_range(
        &self,
        _calendar_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|event| event.date >= start && event.date <= end)
            .cloned()
            .collect())
    }
}
