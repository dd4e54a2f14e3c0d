use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::gcal::{Event, EventTime, OFFICE_HOURS_QUERY};

pub const DAYS_PER_WEEK: usize = 7;
pub const SLOTS_PER_DAY: usize = 48;

const SLOT_OPEN: char = 'o';
const SLOT_CLOSED: char = 'c';

/// Translate calendar events into the queue's schedule wire format: one
/// string per day, Sunday through Saturday, one character per half-hour
/// slot, open where an office hours session covers the slot.
///
/// Cancelled events and events whose summary is not about office hours are
/// ignored. With no usable events the result is the all-closed week.
pub fn form_schedule(events: &[Event]) -> Result<Vec<String>> {
    let mut grid = [[SLOT_CLOSED; SLOTS_PER_DAY]; DAYS_PER_WEEK];

    let sessions = events
        .iter()
        .filter(|event| event.status != "cancelled" && event.summary.contains(OFFICE_HOURS_QUERY));
    for event in sessions {
        let start = concrete_time(&event.start, event)?;
        let end = concrete_time(&event.end, event)?;

        // Queue weeks run Sunday through Saturday.
        let day = start.weekday().num_days_from_sunday() as usize;
        let from = half_hour_index(&start);
        let to = half_hour_index(&end);
        if to > from {
            for slot in &mut grid[day][from..to] {
                *slot = SLOT_OPEN;
            }
        }
    }

    Ok(grid
        .iter()
        .map(|row| row.iter().collect::<String>())
        .collect_vec())
}

fn concrete_time(time: &EventTime, event: &Event) -> Result<DateTime<FixedOffset>> {
    time.date_time.ok_or_else(|| Error::CalendarFetch {
        reason: format!("event {:?} has no concrete start/end time", event.summary),
    })
}

fn half_hour_index(timestamp: &DateTime<FixedOffset>) -> usize {
    (timestamp.hour() * 2 + u32::from(timestamp.minute() >= 30)) as usize
}
