use icalendar::{Calendar, Component, Event, EventLike};

use crate::calendar::schedule::CourseEvent;

/// Display name written as the calendar's `X-WR-CALNAME`.
pub const CALENDAR_NAME: &str = "Coursepack AI Planner";

/// Converts scheduled events into an iCalendar document with floating local times.
pub fn build_calendar(events: &[CourseEvent]) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.name(CALENDAR_NAME);

    for course_event in events {
        let mut event = Event::new();
        event
            .summary(&course_event.summary)
            .starts(course_event.start)
            .ends(course_event.end);
        if let Some(description) = &course_event.description {
            event.description(description);
        }
        if let Some(priority) = course_event.priority {
            event.priority(priority);
        }
        calendar.push(event.done());
    }

    calendar.done()
}
