//! Date bucketing. Places lectures, homework deadlines and exams on the calendar.
//!
//! Pure: takes the plan and quarter timing, returns events. Serialization
//! lives in `ics`.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::planning::models::{CoursePlan, Homework, PlannedWeek};

pub const EXAM_DURATION_MINUTES: i64 = 90;
/// Homework is due the Sunday after the week's Monday.
const HOMEWORK_DUE_OFFSET_DAYS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Lecture,
    HomeworkDue,
    Exam,
}

/// A calendar event, independent of any serialization format.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseEvent {
    pub kind: EventKind,
    pub summary: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// RFC 5545 priority (1 = highest).
    pub priority: Option<u32>,
}

/// Lecture slot shared by lectures and exams.
#[derive(Debug, Clone, Copy)]
pub struct LectureSlot {
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
}

/// Exam checkpoints by one-based week number for a plan of `total_weeks` weeks.
///
/// Midterm 1 after a third of the weeks, Midterm 2 after two thirds, the
/// final in the last week. When checkpoints collide the later exam wins.
pub fn exam_weeks(total_weeks: u32) -> BTreeMap<u32, &'static str> {
    let mut exams = BTreeMap::new();
    exams.insert(total_weeks / 3, "Midterm 1");
    exams.insert(total_weeks * 2 / 3, "Midterm 2");
    exams.insert(total_weeks, "Final Exam");
    exams
}

/// Builds every calendar event for the plan, week by week.
pub fn schedule_events(plan: &CoursePlan, slot: LectureSlot) -> Vec<CourseEvent> {
    let exams = exam_weeks(plan.weeks.len() as u32);

    let mut events = Vec::new();
    for week in &plan.weeks {
        events.extend(lecture_events(week, slot));
        events.extend(homework_event(week));
        if let Some(name) = exams.get(&week.week) {
            events.extend(exam_event(week, name, slot));
        }
    }
    events
}

fn lecture_events(week: &PlannedWeek, slot: LectureSlot) -> Vec<CourseEvent> {
    // Extra lectures beyond three days are dropped; days without a date are skipped.
    week.plan
        .lectures
        .iter()
        .zip(week.dates.lecture_days())
        .filter_map(|(lecture, day)| {
            let start = day?.and_time(slot.start_time);
            Some(CourseEvent {
                kind: EventKind::Lecture,
                summary: format!("Lecture: {}", lecture.title),
                description: Some(format!("Topics: {}", lecture.topics.join(", "))),
                start,
                end: start + Duration::minutes(slot.duration_minutes),
                priority: None,
            })
        })
        .collect()
}

fn homework_event(week: &PlannedWeek) -> Option<CourseEvent> {
    // An empty homework object means nothing is due
    if week.plan.homework.as_ref().map_or(true, Homework::is_empty) {
        return None;
    }
    let monday = week.dates.monday?;

    let due_time = NaiveTime::from_hms_opt(23, 59, 0)?;
    let due = (monday + Duration::days(HOMEWORK_DUE_OFFSET_DAYS)).and_time(due_time);
    Some(CourseEvent {
        kind: EventKind::HomeworkDue,
        summary: format!("HW Due: {}", week.label()),
        description: None,
        start: due,
        end: due,
        priority: None,
    })
}

fn exam_event(week: &PlannedWeek, name: &str, slot: LectureSlot) -> Option<CourseEvent> {
    let start = week.dates.friday?.and_time(slot.start_time);
    Some(CourseEvent {
        kind: EventKind::Exam,
        summary: format!("EXAM: {name}"),
        description: Some("Location: TBD".to_string()),
        start,
        end: start + Duration::minutes(EXAM_DURATION_MINUTES),
        priority: Some(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::models::{Lecture, WeekPlan};
    use crate::planning::planner::week_dates;
    use chrono::NaiveDate;

    fn slot() -> LectureSlot {
        LectureSlot {
            start_time: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            duration_minutes: 50,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn lecture(title: &str) -> Lecture {
        Lecture {
            title: title.to_string(),
            topics: vec!["a".to_string(), "b".to_string()],
        }
    }

    fn week(number: u32, lectures: usize) -> PlannedWeek {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        PlannedWeek {
            section: format!("1.{number}"),
            week: number,
            dates: week_dates(start, number - 1),
            plan: WeekPlan {
                lectures: (0..lectures).map(|i| lecture(&format!("L{i}"))).collect(),
                homework: Some(Homework {
                    exercises: vec![format!("1.{number}")],
                    description: String::new(),
                }),
                key_concepts: vec![],
            },
        }
    }

    fn of_kind(events: &[CourseEvent], kind: EventKind) -> Vec<&CourseEvent> {
        events.iter().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn test_exam_weeks_for_a_ten_week_quarter() {
        let exams = exam_weeks(10);
        assert_eq!(exams.get(&3), Some(&"Midterm 1"));
        assert_eq!(exams.get(&6), Some(&"Midterm 2"));
        assert_eq!(exams.get(&10), Some(&"Final Exam"));
    }

    #[test]
    fn test_exam_weeks_collisions_keep_the_later_exam() {
        // 1 week: 1/3 = 0 and 2/3 = 0 collide, the final sits on week 1
        let exams = exam_weeks(1);
        assert_eq!(exams.get(&0), Some(&"Midterm 2"));
        assert_eq!(exams.get(&1), Some(&"Final Exam"));
        assert_eq!(exams.len(), 2);
    }

    #[test]
    fn test_lectures_fall_on_monday_wednesday_friday() {
        let plan = CoursePlan {
            weeks: vec![week(1, 3)],
        };
        let events = schedule_events(&plan, slot());
        let lectures = of_kind(&events, EventKind::Lecture);

        assert_eq!(lectures.len(), 3);
        assert_eq!(lectures[0].start, at(2025, 1, 6, 12, 30));
        assert_eq!(lectures[0].end, at(2025, 1, 6, 13, 20));
        assert_eq!(lectures[1].start, at(2025, 1, 8, 12, 30));
        assert_eq!(lectures[2].start, at(2025, 1, 10, 12, 30));
        assert_eq!(lectures[0].summary, "Lecture: L0");
        assert_eq!(lectures[0].description.as_deref(), Some("Topics: a, b"));
    }

    #[test]
    fn test_fourth_lecture_is_dropped() {
        let plan = CoursePlan {
            weeks: vec![week(1, 4)],
        };
        let events = schedule_events(&plan, slot());
        assert_eq!(of_kind(&events, EventKind::Lecture).len(), 3);
    }

    #[test]
    fn test_lecture_without_date_is_skipped() {
        let mut w = week(1, 3);
        w.dates.wednesday = None;
        let events = schedule_events(&CoursePlan { weeks: vec![w] }, slot());

        let starts: Vec<_> = of_kind(&events, EventKind::Lecture)
            .iter()
            .map(|e| e.start)
            .collect();
        assert_eq!(starts, [at(2025, 1, 6, 12, 30), at(2025, 1, 10, 12, 30)]);
    }

    #[test]
    fn test_homework_due_sunday_night() {
        let plan = CoursePlan {
            weeks: vec![week(2, 0)],
        };
        let events = schedule_events(&plan, slot());
        let due = of_kind(&events, EventKind::HomeworkDue);

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].start, at(2025, 1, 19, 23, 59));
        assert_eq!(due[0].end, due[0].start);
        assert_eq!(due[0].summary, "HW Due: 1.2");
    }

    #[test]
    fn test_no_homework_event_without_homework_or_monday() {
        let mut no_homework = week(1, 0);
        no_homework.plan.homework = None;
        let mut no_monday = week(2, 0);
        no_monday.dates.monday = None;

        let events = schedule_events(
            &CoursePlan {
                weeks: vec![no_homework, no_monday],
            },
            slot(),
        );
        assert!(of_kind(&events, EventKind::HomeworkDue).is_empty());
    }

    #[test]
    fn test_empty_homework_has_no_due_event() {
        let mut w = week(1, 0);
        w.plan.homework = Some(Homework::default());
        let events = schedule_events(&CoursePlan { weeks: vec![w] }, slot());
        assert!(of_kind(&events, EventKind::HomeworkDue).is_empty());
    }

    #[test]
    fn test_exams_on_checkpoint_fridays() {
        let plan = CoursePlan {
            weeks: (1..=6).map(|n| week(n, 0)).collect(),
        };
        let events = schedule_events(&plan, slot());
        let exams = of_kind(&events, EventKind::Exam);

        let summaries: Vec<_> = exams.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(
            summaries,
            ["EXAM: Midterm 1", "EXAM: Midterm 2", "EXAM: Final Exam"]
        );
        // Week 2 Friday
        assert_eq!(exams[0].start, at(2025, 1, 17, 12, 30));
        assert_eq!(exams[0].end, at(2025, 1, 17, 14, 0));
        assert_eq!(exams[0].priority, Some(1));
        assert_eq!(exams[0].description.as_deref(), Some("Location: TBD"));
    }

    #[test]
    fn test_empty_plan_has_no_events() {
        assert!(schedule_events(&CoursePlan::default(), slot()).is_empty());
    }
}
