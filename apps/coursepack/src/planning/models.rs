//! Course plan data model, shared by the planner, calendar and artifact generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A lecture in a week's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecture {
    pub title: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Homework assigned for a week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Homework {
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Homework {
    /// No exercises and no description: nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty() && self.description.trim().is_empty()
    }
}

/// The structured answer requested from the model for one week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    #[serde(default)]
    pub lectures: Vec<Lecture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homework: Option<Homework>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
}

/// Teaching days of a week. Lectures fall on these three days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<NaiveDate>,
}

impl WeekDates {
    /// Dates in lecture order: Monday, Wednesday, Friday.
    pub fn lecture_days(&self) -> [Option<NaiveDate>; 3] {
        [self.monday, self.wednesday, self.friday]
    }
}

/// A planned week as written to `plan.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedWeek {
    /// Book section key, e.g. "1.2".
    #[serde(default)]
    pub section: String,
    /// One-based week number.
    pub week: u32,
    #[serde(default)]
    pub dates: WeekDates,
    #[serde(flatten)]
    pub plan: WeekPlan,
}

impl PlannedWeek {
    /// Label used for the homework due event: the section, or "Week N".
    pub fn label(&self) -> String {
        if self.section.is_empty() {
            format!("Week {}", self.week)
        } else {
            self.section.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoursePlan {
    #[serde(default)]
    pub weeks: Vec<PlannedWeek>,
}

impl CoursePlan {
    /// Key concepts of every week, in week order.
    pub fn all_key_concepts(&self) -> Vec<String> {
        self.weeks
            .iter()
            .flat_map(|w| w.plan.key_concepts.iter().cloned())
            .collect()
    }
}

/// Response schema for [`WeekPlan`] in the model's OpenAPI subset.
pub fn week_plan_schema() -> Value {
    let strings = json!({"type": "ARRAY", "items": {"type": "STRING"}});
    json!({
        "type": "OBJECT",
        "properties": {
            "lectures": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "topics": strings,
                    },
                    "required": ["title", "topics"],
                },
            },
            "homework": {
                "type": "OBJECT",
                "properties": {
                    "exercises": strings,
                    "description": {"type": "STRING"},
                },
                "required": ["exercises", "description"],
            },
            "key_concepts": strings,
        },
        "required": ["lectures", "homework", "key_concepts"],
    })
}
