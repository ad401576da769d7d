// Weekly course planning: section grouping, AI week plans, dates, plan.json.
// All model calls go through llm_client::TextGenerator.

pub mod models;
pub mod planner;
pub mod prompts;
pub mod sections;

pub use models::CoursePlan;
pub use planner::{load_plan, plan_course, write_plan};
