//! Course planner: turns the book's subsections into a dated weekly plan.
//!
//! Flow: group_subsections → (per section) prompt → LLM (JSON schema) →
//!       assign Monday/Wednesday/Friday dates → CoursePlan.
//!
//! One section is one week. A week the model fails to plan is logged and
//! skipped, but the calendar still advances so later weeks keep their dates.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use tracing::{error, info};

use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{generate_json, TextGenerator};
use crate::planning::models::{week_plan_schema, CoursePlan, PlannedWeek, WeekDates, WeekPlan};
use crate::planning::prompts::WEEK_PLAN_PROMPT_TEMPLATE;
use crate::planning::sections::{group_subsections, Section};

/// Teaching days of the week starting `week_index` weeks after `start`.
pub fn week_dates(start: NaiveDate, week_index: u32) -> WeekDates {
    let monday = start + Duration::weeks(i64::from(week_index));
    WeekDates {
        monday: Some(monday),
        wednesday: Some(monday + Duration::days(2)),
        friday: Some(monday + Duration::days(4)),
    }
}

/// Plans every section of the book, one week each, starting at `start`.
pub async fn plan_course(
    generator: &dyn TextGenerator,
    subsections: &[String],
    start: NaiveDate,
) -> CoursePlan {
    let sections = group_subsections(subsections);
    info!("Generating plan for {} sections...", sections.len());

    let mut plan = CoursePlan::default();
    for (index, section) in sections.iter().enumerate() {
        let week_index = index as u32;
        let week = week_index + 1;

        match plan_week(generator, section).await {
            Ok(week_plan) => {
                plan.weeks.push(PlannedWeek {
                    section: section.key.clone(),
                    week,
                    dates: week_dates(start, week_index),
                    plan: week_plan,
                });
                info!("Planned Week {week}");
            }
            Err(e) => error!("Error Planning Week {week}: {e}"),
        }
    }

    plan
}

async fn plan_week(generator: &dyn TextGenerator, section: &Section) -> Result<WeekPlan, AppError> {
    let prompt = build_week_prompt(section);
    Ok(generate_json(generator, &prompt, week_plan_schema()).await?)
}

fn build_week_prompt(section: &Section) -> String {
    let subsections = section
        .subsections
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    fill_template(
        WEEK_PLAN_PROMPT_TEMPLATE,
        &[
            ("section_key", section.key.as_str()),
            ("subsections", subsections.as_str()),
        ],
    )
}

/// Writes the plan as 2-space indented JSON.
pub fn write_plan(path: &Path, plan: &CoursePlan) -> Result<(), AppError> {
    std::fs::write(path, serde_json::to_string_pretty(plan)?)?;
    Ok(())
}

pub fn load_plan(path: &Path) -> Result<CoursePlan, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
