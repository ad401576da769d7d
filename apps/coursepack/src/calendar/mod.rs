// Calendar export: date-bucketing in `schedule`, iCalendar serialization in `ics`.

pub mod ics;
pub mod schedule;

use std::path::Path;

use tracing::info;

use crate::calendar::schedule::{schedule_events, LectureSlot};
use crate::config::QuarterConfig;
use crate::errors::AppError;
use crate::planning::CoursePlan;

/// Schedules the plan and writes it to `path` as an `.ics` file.
pub fn export_calendar(
    plan: &CoursePlan,
    quarter: &QuarterConfig,
    path: &Path,
) -> Result<(), AppError> {
    let slot = LectureSlot {
        start_time: quarter.lecture_start(),
        duration_minutes: quarter.lecture_duration_minutes,
    };
    let events = schedule_events(plan, slot);
    let calendar = ics::build_calendar(&events);

    std::fs::write(path, calendar.to_string())?;
    info!(
        "Calendar exported to {} ({} events)",
        path.display(),
        events.len()
    );
    Ok(())
}
